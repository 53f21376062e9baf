use super::*;

/// Tests that sequential allocations issue consecutive numbers.
///
/// Verifies that the allocator starts at 1 for a fresh guild, issues dense
/// consecutive values, and that the persisted counter reflects every
/// allocation.
///
/// Expected: Ok with 1, 2, 3 and a persisted counter of 3
#[tokio::test]
async fn issues_consecutive_numbers() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);

    assert_eq!(repo.allocate_next_sequence(guild_id).await?, Some(1));
    assert_eq!(repo.allocate_next_sequence(guild_id).await?, Some(2));
    assert_eq!(repo.allocate_next_sequence(guild_id).await?, Some(3));

    let stored = repo.get_by_guild_id(guild_id).await?.unwrap();
    assert_eq!(stored.sequence_counter, 3);

    Ok(())
}

/// Tests that allocation fails cleanly for a guild with no config row.
///
/// Expected: Ok(None) and no config row created as a side effect
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfessionGuildRepository::new(db);

    assert_eq!(repo.allocate_next_sequence(123456789).await?, None);
    assert!(repo.get_by_guild_id(123456789).await?.is_none());

    Ok(())
}

/// Tests that concurrent allocations never duplicate or skip a number.
///
/// Spawns N tasks allocating against the same guild and asserts the resulting
/// multiset of numbers is exactly {1..N}. A read-then-write allocator loses
/// updates here and fails this test.
///
/// Expected: Ok with numbers 1..=N, each exactly once, counter N
#[tokio::test]
async fn concurrent_allocations_are_distinct_and_dense() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    const TASKS: usize = 10;

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            ConfessionGuildRepository::new(&db)
                .allocate_next_sequence(guild_id)
                .await
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        let allocated = handle.await.unwrap()?;
        numbers.push(allocated.expect("guild is configured"));
    }

    numbers.sort_unstable();
    let expected: Vec<i64> = (1..=TASKS as i64).collect();
    assert_eq!(numbers, expected);

    let stored = ConfessionGuildRepository::new(db)
        .get_by_guild_id(guild_id)
        .await?
        .unwrap();
    assert_eq!(stored.sequence_counter, TASKS as i64);

    Ok(())
}

/// Tests that guilds allocate independently.
///
/// Expected: Ok with both guilds receiving number 1
#[tokio::test]
async fn guilds_allocate_independently() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild1 = factory::confession_guild::create_guild(db).await?;
    let guild2 = factory::confession_guild::create_guild(db).await?;

    let repo = ConfessionGuildRepository::new(db);

    assert_eq!(
        repo.allocate_next_sequence(guild1.guild_id.parse().unwrap())
            .await?,
        Some(1)
    );
    assert_eq!(
        repo.allocate_next_sequence(guild2.guild_id.parse().unwrap())
            .await?,
        Some(1)
    );

    Ok(())
}

/// Tests that allocation continues from a pre-existing counter.
///
/// Expected: Ok with the next number after the stored counter
#[tokio::test]
async fn continues_from_existing_counter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::ConfessionGuildFactory::new(db)
        .sequence_counter(41)
        .build()
        .await?;

    let repo = ConfessionGuildRepository::new(db);
    assert_eq!(
        repo.allocate_next_sequence(guild.guild_id.parse().unwrap())
            .await?,
        Some(42)
    );

    Ok(())
}
