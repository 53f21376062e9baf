//! Confession data repository for database operations.
//!
//! This module provides the `ConfessionRepository` for managing confession
//! records in the database: persisting accepted submissions, resolving reply
//! chains to their root, claiming thread ids, and computing guild statistics.
//! Conversion between entity models and domain models happens at this
//! infrastructure boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::model::confession::{Confession, ConfessionStats, CreateConfessionParam};

/// Repository providing database operations for confession records.
pub struct ConfessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConfessionRepository<'a> {
    /// Creates a new ConfessionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persists an accepted submission.
    ///
    /// For replies (`reply_to_sequence` set) the insert and the target
    /// record's `reply_count` increment execute in one transaction, the
    /// increment as an in-place column expression so concurrent replies to the
    /// same target cannot lose counts.
    ///
    /// # Arguments
    /// - `param` - Creation parameters for the record
    ///
    /// # Returns
    /// - `Ok(Confession)` - The created record
    /// - `Err(DbErr)` - Database error; nothing persisted
    pub async fn create(&self, param: CreateConfessionParam) -> Result<Confession, DbErr> {
        let active = entity::confession::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            sequence_number: ActiveValue::Set(param.sequence_number),
            author_id: ActiveValue::Set(param.author_id.to_string()),
            body: ActiveValue::Set(param.body),
            thread_id: ActiveValue::Set(param.thread_id.map(|id| id.to_string())),
            anchor_message_id: ActiveValue::Set(param.anchor_message_id.to_string()),
            is_reply: ActiveValue::Set(param.reply_to_sequence.is_some()),
            reply_to_sequence: ActiveValue::Set(param.reply_to_sequence),
            reply_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
        };

        let entity = match param.reply_to_sequence {
            Some(target_sequence) => {
                let txn = self.db.begin().await?;

                let entity = active.insert(&txn).await?;

                entity::prelude::Confession::update_many()
                    .col_expr(
                        entity::confession::Column::ReplyCount,
                        Expr::col(entity::confession::Column::ReplyCount).add(1),
                    )
                    .filter(entity::confession::Column::GuildId.eq(param.guild_id.to_string()))
                    .filter(entity::confession::Column::SequenceNumber.eq(target_sequence))
                    .exec(&txn)
                    .await?;

                txn.commit().await?;
                entity
            }
            None => active.insert(self.db).await?,
        };

        Ok(Confession::from_entity(entity))
    }

    /// Gets a confession record by its guild-scoped sequence number.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `sequence_number` - Guild-scoped confession number
    ///
    /// # Returns
    /// - `Ok(Some(Confession))` - Record found
    /// - `Ok(None)` - No record with that number in this guild
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_sequence(
        &self,
        guild_id: u64,
        sequence_number: i64,
    ) -> Result<Option<Confession>, DbErr> {
        let entity = entity::prelude::Confession::find()
            .filter(entity::confession::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::confession::Column::SequenceNumber.eq(sequence_number))
            .one(self.db)
            .await?;

        Ok(entity.map(Confession::from_entity))
    }

    /// Resolves a record to the root of its reply chain.
    ///
    /// Controls attached to reply messages already carry the root's number, so
    /// this usually returns after one lookup. Hand-crafted targets may point
    /// at a reply; the walk follows `reply_to_sequence` links, which must be
    /// strictly decreasing — a link that is not is treated as unresolvable
    /// rather than looping.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `sequence_number` - Number of any record in the chain
    ///
    /// # Returns
    /// - `Ok(Some(Confession))` - The chain's root (non-reply) record
    /// - `Ok(None)` - The record, or a link on the way to the root, is missing
    /// - `Err(DbErr)` - Database error during query
    pub async fn resolve_root(
        &self,
        guild_id: u64,
        sequence_number: i64,
    ) -> Result<Option<Confession>, DbErr> {
        let mut current = match self.get_by_sequence(guild_id, sequence_number).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        while current.is_reply {
            let target = match current.reply_to_sequence {
                Some(target) if target < current.sequence_number => target,
                _ => return Ok(None),
            };

            current = match self.get_by_sequence(guild_id, target).await? {
                Some(record) => record,
                None => return Ok(None),
            };
        }

        Ok(Some(current))
    }

    /// Claims the discussion thread for a record, if none is set yet.
    ///
    /// Conditional update: `thread_id` is written only where it is currently
    /// null, so exactly one of several racing resolvers wins. Losers observe
    /// zero affected rows and should re-read the persisted winner.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `sequence_number` - Guild-scoped confession number
    /// - `thread_id` - Freshly created Discord thread ID
    ///
    /// # Returns
    /// - `Ok(true)` - This caller set the thread id
    /// - `Ok(false)` - A thread id was already present; value unchanged
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_thread_if_absent(
        &self,
        guild_id: u64,
        sequence_number: i64,
        thread_id: u64,
    ) -> Result<bool, DbErr> {
        let update = entity::prelude::Confession::update_many()
            .col_expr(
                entity::confession::Column::ThreadId,
                Expr::value(thread_id.to_string()),
            )
            .filter(entity::confession::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::confession::Column::SequenceNumber.eq(sequence_number))
            .filter(entity::confession::Column::ThreadId.is_null())
            .exec(self.db)
            .await?;

        Ok(update.rows_affected == 1)
    }

    /// Computes aggregate confession counts for a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `day_start` - Start of the current UTC day, for the `today` count
    ///
    /// # Returns
    /// - `Ok(ConfessionStats)` - Total, today, and reply counts
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_stats(
        &self,
        guild_id: u64,
        day_start: DateTime<Utc>,
    ) -> Result<ConfessionStats, DbErr> {
        let guild_id_str = guild_id.to_string();

        let total = entity::prelude::Confession::find()
            .filter(entity::confession::Column::GuildId.eq(guild_id_str.as_str()))
            .count(self.db)
            .await?;

        let today = entity::prelude::Confession::find()
            .filter(entity::confession::Column::GuildId.eq(guild_id_str.as_str()))
            .filter(entity::confession::Column::CreatedAt.gte(day_start))
            .count(self.db)
            .await?;

        let replies = entity::prelude::Confession::find()
            .filter(entity::confession::Column::GuildId.eq(guild_id_str.as_str()))
            .filter(entity::confession::Column::IsReply.eq(true))
            .count(self.db)
            .await?;

        Ok(ConfessionStats {
            total,
            today,
            replies,
        })
    }
}
