use crate::{
    data::confession_guild::ConfessionGuildRepository, error::confession::ConfessionError,
    service::confession::{ConfessionSubmission, SubmissionRequest},
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use serenity::http::Http;
use std::sync::Arc;
use test_utils::{builder::TestBuilder, factory};


/// An HTTP client that is never allowed to reach the network.
///
/// The rejection paths under test all fail before the first Discord call, so
/// a client built from a dummy token is enough; any accidental use would
/// error, not hang.
fn offline_http() -> Arc<Http> {
    Arc::new(Http::new(""))
}
