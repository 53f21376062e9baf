use super::*;

/// Tests fetching an existing guild configuration.
///
/// Expected: Ok with the stored config
#[tokio::test]
async fn returns_config_for_known_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    let repo = ConfessionGuildRepository::new(db);
    let config = repo
        .get_by_guild_id(guild.guild_id.parse().unwrap())
        .await?;

    assert!(config.is_some());
    assert_eq!(config.unwrap().guild_id, guild.guild_id);

    Ok(())
}

/// Tests fetching a guild that has never been set up.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ConfessionGuildRepository::new(db);
    assert!(repo.get_by_guild_id(987654321).await?.is_none());

    Ok(())
}
