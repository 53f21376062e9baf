use super::*;

/// Tests claiming a thread on a threadless record.
///
/// Expected: Ok(true) with the thread id persisted
#[tokio::test]
async fn claims_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (guild, confession) = factory::helpers::create_guild_with_confession(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionRepository::new(db);
    let claimed = repo
        .set_thread_if_absent(guild_id, confession.sequence_number, 777777777)
        .await?;

    assert!(claimed);

    let stored = repo
        .get_by_sequence(guild_id, confession.sequence_number)
        .await?
        .unwrap();
    assert_eq!(stored.thread_id, Some("777777777".to_string()));

    Ok(())
}

/// Tests that exactly one of two claimants wins.
///
/// The second conditional update sees a non-null thread id and leaves the
/// winner's value in place — this is what makes racing repliers converge on
/// one thread instead of two.
///
/// Expected: first Ok(true), second Ok(false), winner's id persisted
#[tokio::test]
async fn second_claim_loses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (guild, confession) = factory::helpers::create_guild_with_confession(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionRepository::new(db);

    assert!(repo
        .set_thread_if_absent(guild_id, confession.sequence_number, 111111111)
        .await?);
    assert!(!repo
        .set_thread_if_absent(guild_id, confession.sequence_number, 222222222)
        .await?);

    let stored = repo
        .get_by_sequence(guild_id, confession.sequence_number)
        .await?
        .unwrap();
    assert_eq!(stored.thread_id, Some("111111111".to_string()));

    Ok(())
}

/// Tests that a record created with a thread is never re-claimed.
///
/// Expected: Ok(false) with the original id untouched
#[tokio::test]
async fn preset_thread_is_not_overwritten() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;
    let confession = factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(1)
        .thread_id(Some("333333333".to_string()))
        .build()
        .await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionRepository::new(db);
    assert!(!repo
        .set_thread_if_absent(guild_id, confession.sequence_number, 999999999)
        .await?);

    let stored = repo
        .get_by_sequence(guild_id, confession.sequence_number)
        .await?
        .unwrap();
    assert_eq!(stored.thread_id, Some("333333333".to_string()));

    Ok(())
}
