use super::*;

/// Tests that a non-reply record resolves to itself.
///
/// Expected: Ok with the record returned unchanged
#[tokio::test]
async fn confession_resolves_to_itself() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (guild, confession) = factory::helpers::create_guild_with_confession(db).await?;

    let repo = ConfessionRepository::new(db);
    let root = repo
        .resolve_root(guild.guild_id.parse().unwrap(), confession.sequence_number)
        .await?
        .unwrap();

    assert_eq!(root.sequence_number, confession.sequence_number);
    assert!(!root.is_reply);

    Ok(())
}

/// Tests root resolution across a reply-to-reply chain.
///
/// A reply targeting another reply still resolves to the chain's original
/// confession, so its thread — and only its thread — hosts the whole chain.
///
/// Expected: Ok with the original confession as root
#[tokio::test]
async fn deep_chain_resolves_to_original() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(1)
        .thread_id(Some("thread_1".to_string()))
        .build()
        .await?;
    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(2)
        .reply_to(1)
        .thread_id(Some("thread_1".to_string()))
        .build()
        .await?;
    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(3)
        .reply_to(2)
        .thread_id(Some("thread_1".to_string()))
        .build()
        .await?;

    let repo = ConfessionRepository::new(db);
    let root = repo
        .resolve_root(guild.guild_id.parse().unwrap(), 3)
        .await?
        .unwrap();

    assert_eq!(root.sequence_number, 1);
    assert_eq!(root.thread_id, Some("thread_1".to_string()));

    Ok(())
}

/// Tests resolution of a number that was never issued.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    let repo = ConfessionRepository::new(db);
    assert!(repo
        .resolve_root(guild.guild_id.parse().unwrap(), 5)
        .await?
        .is_none());

    Ok(())
}

/// Tests resolution when a link in the chain is missing.
///
/// Expected: Ok(None) rather than an error or a partial root
#[tokio::test]
async fn returns_none_for_broken_link() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(4)
        .reply_to(2) // no record #2 exists
        .build()
        .await?;

    let repo = ConfessionRepository::new(db);
    assert!(repo
        .resolve_root(guild.guild_id.parse().unwrap(), 4)
        .await?
        .is_none());

    Ok(())
}

/// Tests that a non-decreasing reply link is treated as unresolvable.
///
/// Reply links must point strictly backwards; a corrupted forward link would
/// otherwise allow an infinite walk.
///
/// Expected: Ok(None)
#[tokio::test]
async fn rejects_forward_link() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_confession_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::confession_guild::create_guild(db).await?;

    factory::confession::ConfessionFactory::new(db, &guild.guild_id)
        .sequence_number(5)
        .reply_to(7)
        .build()
        .await?;

    let repo = ConfessionRepository::new(db);
    assert!(repo
        .resolve_root(guild.guild_id.parse().unwrap(), 5)
        .await?
        .is_none());

    Ok(())
}
