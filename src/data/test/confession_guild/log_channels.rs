use super::*;

/// Tests setting the public log channel on a configured guild.
///
/// Expected: Ok with the channel stored, private log untouched
#[tokio::test]
async fn sets_public_log_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let updated = repo
        .set_public_log_channel(guild_id, Some(333333333))
        .await?
        .unwrap();

    assert_eq!(updated.public_log_channel_id, Some("333333333".to_string()));
    assert!(updated.private_log_channel_id.is_none());

    Ok(())
}

/// Tests setting the private log channel on a configured guild.
///
/// Expected: Ok with the channel stored, public log untouched
#[tokio::test]
async fn sets_private_log_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let updated = repo
        .set_private_log_channel(guild_id, Some(444444444))
        .await?
        .unwrap();

    assert_eq!(updated.private_log_channel_id, Some("444444444".to_string()));
    assert!(updated.public_log_channel_id.is_none());

    Ok(())
}

/// Tests that log channels cannot be set before setup.
///
/// Expected: Ok(None) and no row created
#[tokio::test]
async fn returns_none_when_unconfigured() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfessionGuildRepository::new(db);

    assert!(repo
        .set_public_log_channel(123456789, Some(1))
        .await?
        .is_none());
    assert!(repo.get_by_guild_id(123456789).await?.is_none());

    Ok(())
}

/// Tests disabling a log by clearing the channel.
///
/// Expected: Ok with the channel back to None
#[tokio::test]
async fn clears_channel_with_none() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::ConfessionGuildFactory::new(db)
        .public_log_channel_id(Some("333".to_string()))
        .build()
        .await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let updated = repo.set_public_log_channel(guild_id, None).await?.unwrap();

    assert!(updated.public_log_channel_id.is_none());

    Ok(())
}
