//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// This function provides monotonically increasing values for use in
/// generating unique test identifiers across all factories.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a configured guild together with one published confession.
///
/// This is a convenience method that creates:
/// 1. A confession guild config with a confession channel set
/// 2. A confession record with `sequence_number` 1 in that guild
///
/// The guild's `sequence_counter` is set to 1 to stay consistent with the
/// single record. Use the individual factories if you need to customize
/// specific entities.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((guild, confession))` - Tuple of the created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_guild_with_confession(
    db: &DatabaseConnection,
) -> Result<(entity::confession_guild::Model, entity::confession::Model), DbErr> {
    let guild = crate::factory::confession_guild::ConfessionGuildFactory::new(db)
        .sequence_counter(1)
        .build()
        .await?;
    let confession = crate::factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(1)
        .build()
        .await?;

    Ok((guild, confession))
}
