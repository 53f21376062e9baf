use crate::{
    data::confession::ConfessionRepository, model::confession::CreateConfessionParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_stats;
mod resolve_root;
mod set_thread_if_absent;
