use super::*;
use chrono::{Duration, NaiveTime, Utc};

fn day_start() -> chrono::DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Tests total and reply counts.
///
/// Expected: Ok with totals covering every record and replies only the replies
#[tokio::test]
async fn counts_totals_and_replies() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(1)
        .build()
        .await?;
    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(2)
        .build()
        .await?;
    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(3)
        .reply_to(1)
        .build()
        .await?;

    let repo = ConfessionRepository::new(db);
    let stats = repo
        .get_stats(guild.guild_id.parse().unwrap(), day_start())
        .await?;

    assert_eq!(stats.total, 3);
    assert_eq!(stats.replies, 1);
    assert_eq!(stats.today, 3);

    Ok(())
}

/// Tests that the today count excludes older records.
///
/// Expected: Ok with only records from the current UTC day counted as today
#[tokio::test]
async fn today_excludes_older_records() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(1)
        .created_at(Utc::now() - Duration::days(2))
        .build()
        .await?;
    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(2)
        .build()
        .await?;

    let repo = ConfessionRepository::new(db);
    let stats = repo
        .get_stats(guild.guild_id.parse().unwrap(), day_start())
        .await?;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.today, 1);

    Ok(())
}

/// Tests stats for a guild with no records.
///
/// Expected: Ok with all counts zero
#[tokio::test]
async fn empty_guild_counts_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    let repo = ConfessionRepository::new(db);
    let stats = repo
        .get_stats(guild.guild_id.parse().unwrap(), day_start())
        .await?;

    assert_eq!(stats.total, 0);
    assert_eq!(stats.today, 0);
    assert_eq!(stats.replies, 0);

    Ok(())
}

/// Tests that stats never leak across guilds.
///
/// Expected: Ok with each guild counting only its own records
#[tokio::test]
async fn stats_are_guild_scoped() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild1 = factory::confession_guild::create_guild(db).await?;
    let guild2 = factory::confession_guild::create_guild(db).await?;

    factory::confession::create_confession(db, &guild1.guild_id).await?;

    let repo = ConfessionRepository::new(db);
    let stats = repo
        .get_stats(guild2.guild_id.parse().unwrap(), day_start())
        .await?;

    assert_eq!(stats.total, 0);

    Ok(())
}
