use sea_orm_migration::{prelude::*, schema::*};

use super::m20260807_000001_create_confession_guild_table::ConfessionGuild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Confession::Table)
                    .if_not_exists()
                    .col(pk_auto(Confession::Id))
                    .col(string(Confession::GuildId))
                    .col(big_integer(Confession::SequenceNumber))
                    .col(string(Confession::AuthorId))
                    .col(text(Confession::Body))
                    .col(string_null(Confession::ThreadId))
                    .col(string(Confession::AnchorMessageId))
                    .col(boolean(Confession::IsReply).default(false))
                    .col(big_integer_null(Confession::ReplyToSequence))
                    .col(integer(Confession::ReplyCount).default(0))
                    .col(
                        timestamp(Confession::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_confession_guild_id")
                            .from(Confession::Table, Confession::GuildId)
                            .to(ConfessionGuild::Table, ConfessionGuild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Sequence numbers are unique per guild, not globally.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_confession_guild_id_sequence_number")
                    .table(Confession::Table)
                    .col(Confession::GuildId)
                    .col(Confession::SequenceNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Confession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Confession {
    Table,
    Id,
    GuildId,
    SequenceNumber,
    AuthorId,
    Body,
    ThreadId,
    AnchorMessageId,
    IsReply,
    ReplyToSequence,
    ReplyCount,
    CreatedAt,
}
