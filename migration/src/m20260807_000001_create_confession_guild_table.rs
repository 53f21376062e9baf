use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfessionGuild::Table)
                    .if_not_exists()
                    .col(pk_auto(ConfessionGuild::Id))
                    .col(string_uniq(ConfessionGuild::GuildId))
                    .col(string_null(ConfessionGuild::ConfessionChannelId))
                    .col(string_null(ConfessionGuild::PublicLogChannelId))
                    .col(string_null(ConfessionGuild::PrivateLogChannelId))
                    .col(big_integer(ConfessionGuild::SequenceCounter).default(0))
                    .col(string_null(ConfessionGuild::AnchorMessageId))
                    .col(
                        timestamp(ConfessionGuild::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(ConfessionGuild::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfessionGuild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ConfessionGuild {
    Table,
    Id,
    GuildId,
    ConfessionChannelId,
    PublicLogChannelId,
    PrivateLogChannelId,
    SequenceCounter,
    AnchorMessageId,
    CreatedAt,
    UpdatedAt,
}
