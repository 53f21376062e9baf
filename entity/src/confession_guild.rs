use sea_orm::entity::prelude::*;

/// Per-guild confession configuration.
///
/// One row per guild, created by the setup command. `sequence_counter` is the
/// last confession number issued for the guild and is only ever incremented
/// in place by the allocator; it never decreases, even when confessions are
/// later deleted on the Discord side.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "confession_guild")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub confession_channel_id: Option<String>,
    pub public_log_channel_id: Option<String>,
    pub private_log_channel_id: Option<String>,
    pub sequence_counter: i64,
    pub anchor_message_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
