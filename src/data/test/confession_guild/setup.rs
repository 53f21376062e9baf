use super::*;

/// Tests creating a fresh guild configuration.
///
/// Expected: Ok with a zero counter and the channel and anchor stored
#[tokio::test]
async fn creates_new_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let config = repo
        .setup(SetupGuildParam {
            guild_id: 123456789,
            confession_channel_id: 111111111,
            anchor_message_id: 222222222,
        })
        .await?;

    assert_eq!(config.guild_id, "123456789");
    assert_eq!(config.confession_channel_id, Some("111111111".to_string()));
    assert_eq!(config.anchor_message_id, Some("222222222".to_string()));
    assert_eq!(config.sequence_counter, 0);
    assert!(config.public_log_channel_id.is_none());
    assert!(config.private_log_channel_id.is_none());

    Ok(())
}

/// Tests that re-running setup preserves the sequence counter.
///
/// Numbers already issued must stay issued: reconfiguring the channel never
/// restarts numbering from 1.
///
/// Expected: Ok with the channel replaced and the counter untouched
#[tokio::test]
async fn preserves_counter_on_resetup() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::ConfessionGuildFactory::new(db)
        .sequence_counter(7)
        .build()
        .await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let updated = repo
        .setup(SetupGuildParam {
            guild_id,
            confession_channel_id: 999999999,
            anchor_message_id: 888888888,
        })
        .await?;

    assert_eq!(updated.id, guild.id); // Same record
    assert_eq!(updated.sequence_counter, 7);
    assert_eq!(updated.confession_channel_id, Some("999999999".to_string()));
    assert_eq!(updated.anchor_message_id, Some("888888888".to_string()));

    Ok(())
}

/// Tests that re-running setup keeps the configured log channels.
///
/// Expected: Ok with log channels surviving the channel change
#[tokio::test]
async fn preserves_log_channels_on_resetup() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::ConfessionGuildFactory::new(db)
        .public_log_channel_id(Some("444".to_string()))
        .private_log_channel_id(Some("555".to_string()))
        .build()
        .await?;
    let guild_id = guild.guild_id.parse::<u64>().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    let updated = repo
        .setup(SetupGuildParam {
            guild_id,
            confession_channel_id: 999999999,
            anchor_message_id: 888888888,
        })
        .await?;

    assert_eq!(updated.public_log_channel_id, Some("444".to_string()));
    assert_eq!(updated.private_log_channel_id, Some("555".to_string()));

    Ok(())
}
