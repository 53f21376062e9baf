//! Confession guild data repository for database operations.
//!
//! This module provides the `ConfessionGuildRepository` for managing per-guild
//! confession configuration records, including the guild-scoped sequence
//! counter. The repository handles setup upserts, log channel updates, and
//! race-free sequence allocation with proper conversion between entity models
//! and domain models at the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, ExprTrait, QueryFilter, TransactionTrait,
};

use crate::model::confession_guild::{ConfessionGuildConfig, SetupGuildParam};

/// Repository providing database operations for guild confession configuration.
///
/// This struct holds a reference to the database connection and provides methods
/// for creating, updating, and querying guild config records, and for allocating
/// confession sequence numbers.
pub struct ConfessionGuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConfessionGuildRepository<'a> {
    /// Creates a new ConfessionGuildRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the confession configuration for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(ConfessionGuildConfig))` - Config record found for the guild
    /// - `Ok(None)` - Guild has never been set up
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<ConfessionGuildConfig>, DbErr> {
        let entity = entity::prelude::ConfessionGuild::find()
            .filter(entity::confession_guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        Ok(entity.map(ConfessionGuildConfig::from_entity))
    }

    /// Creates or updates a guild's confession setup.
    ///
    /// Performs an upsert: if a config record already exists for the guild,
    /// replaces the confession channel and anchor message; otherwise creates a
    /// new record with a zero sequence counter. The counter is never reset by
    /// re-running setup — it tracks every number ever issued for the guild.
    ///
    /// # Arguments
    /// - `param` - Setup parameters containing guild, channel, and anchor message
    ///
    /// # Returns
    /// - `Ok(ConfessionGuildConfig)` - The created or updated config
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn setup(&self, param: SetupGuildParam) -> Result<ConfessionGuildConfig, DbErr> {
        let existing = self.get_by_guild_id(param.guild_id).await?;

        let now = Utc::now();

        let entity = if let Some(existing) = existing {
            let active = entity::confession_guild::ActiveModel {
                id: ActiveValue::Set(existing.id),
                guild_id: ActiveValue::Set(existing.guild_id),
                confession_channel_id: ActiveValue::Set(Some(
                    param.confession_channel_id.to_string(),
                )),
                public_log_channel_id: ActiveValue::Set(existing.public_log_channel_id),
                private_log_channel_id: ActiveValue::Set(existing.private_log_channel_id),
                sequence_counter: ActiveValue::Set(existing.sequence_counter),
                anchor_message_id: ActiveValue::Set(Some(param.anchor_message_id.to_string())),
                created_at: ActiveValue::Set(existing.created_at),
                updated_at: ActiveValue::Set(now),
            };
            active.update(self.db).await?
        } else {
            let new_record = entity::confession_guild::ActiveModel {
                id: ActiveValue::NotSet,
                guild_id: ActiveValue::Set(param.guild_id.to_string()),
                confession_channel_id: ActiveValue::Set(Some(
                    param.confession_channel_id.to_string(),
                )),
                public_log_channel_id: ActiveValue::Set(None),
                private_log_channel_id: ActiveValue::Set(None),
                sequence_counter: ActiveValue::Set(0),
                anchor_message_id: ActiveValue::Set(Some(param.anchor_message_id.to_string())),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            };
            new_record.insert(self.db).await?
        };

        Ok(ConfessionGuildConfig::from_entity(entity))
    }

    /// Sets the public (content-redacted) log channel for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `channel_id` - Log channel, or `None` to disable the public log
    ///
    /// # Returns
    /// - `Ok(Some(ConfessionGuildConfig))` - Updated config
    /// - `Ok(None)` - Guild has never been set up; nothing updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_public_log_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<Option<ConfessionGuildConfig>, DbErr> {
        self.update_log_channel(guild_id, channel_id, true).await
    }

    /// Sets the private (author-revealing) log channel for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `channel_id` - Log channel, or `None` to disable the private log
    ///
    /// # Returns
    /// - `Ok(Some(ConfessionGuildConfig))` - Updated config
    /// - `Ok(None)` - Guild has never been set up; nothing updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_private_log_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<Option<ConfessionGuildConfig>, DbErr> {
        self.update_log_channel(guild_id, channel_id, false).await
    }

    async fn update_log_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
        public: bool,
    ) -> Result<Option<ConfessionGuildConfig>, DbErr> {
        let existing = entity::prelude::ConfessionGuild::find()
            .filter(entity::confession_guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: entity::confession_guild::ActiveModel = existing.into();
        let value = channel_id.map(|id| id.to_string());
        if public {
            active.public_log_channel_id = ActiveValue::Set(value);
        } else {
            active.private_log_channel_id = ActiveValue::Set(value);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(ConfessionGuildConfig::from_entity(entity)))
    }

    /// Allocates the next confession number for a guild.
    ///
    /// Linearizable per guild: the increment executes as an in-place column
    /// expression inside a transaction, and the new value is read back before
    /// commit while the row lock is held. Two concurrent allocators therefore
    /// observe distinct consecutive numbers, with no lost update — a plain
    /// read-then-write here would admit duplicates under concurrent
    /// submissions.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Some(sequence))` - The freshly issued number (1-based)
    /// - `Ok(None)` - Guild has never been set up; nothing allocated
    /// - `Err(DbErr)` - Database error; nothing allocated
    pub async fn allocate_next_sequence(&self, guild_id: u64) -> Result<Option<i64>, DbErr> {
        let guild_id_str = guild_id.to_string();
        let txn = self.db.begin().await?;

        let update = entity::prelude::ConfessionGuild::update_many()
            .col_expr(
                entity::confession_guild::Column::SequenceCounter,
                Expr::col(entity::confession_guild::Column::SequenceCounter).add(1),
            )
            .col_expr(
                entity::confession_guild::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::confession_guild::Column::GuildId.eq(guild_id_str.as_str()))
            .exec(&txn)
            .await?;

        if update.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let row = entity::prelude::ConfessionGuild::find()
            .filter(entity::confession_guild::Column::GuildId.eq(guild_id_str.as_str()))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Guild {} config vanished mid-allocation", guild_id))
            })?;

        txn.commit().await?;

        Ok(Some(row.sequence_counter))
    }
}
