use sea_orm::entity::prelude::*;

/// One accepted confession or reply.
///
/// `(guild_id, sequence_number)` is unique. `thread_id` is null until a
/// discussion thread exists for the record; `reply_to_sequence` is set iff
/// `is_reply` and always points at the chain root, so reply chains share the
/// root confession's thread. `author_id` is kept out of all public-facing
/// output and only read by the private audit log and admin lookup.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "confession")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub sequence_number: i64,
    pub author_id: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub thread_id: Option<String>,
    pub anchor_message_id: String,
    pub is_reply: bool,
    pub reply_to_sequence: Option<i64>,
    pub reply_count: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
