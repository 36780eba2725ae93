mod support;

use anyhow::Result;
use storefront_service::user_store::{verify_password, NewUser, UserStore, UserStoreError};
use support::{reset_tables, TestDatabase};

const PEPPER: &str = "test-pepper";
// Minimum bcrypt cost keeps the tests fast.
const HASH_COST: u32 = 4;

fn mock_user() -> NewUser {
    NewUser {
        first_name: "mock".to_string(),
        last_name: "name".to_string(),
        user_name: "mock_u".to_string(),
        password: "mock_pass".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
#[cfg_attr(
    not(feature = "integration"),
    ignore = "enable with --features integration (requires Postgres: embedded or external)"
)]
async fn credential_store_lifecycle() -> Result<()> {
    let Some(db) = TestDatabase::setup().await? else {
        return Ok(());
    };
    let pool = db.pool_clone();
    reset_tables(&pool).await?;

    let store = UserStore::new(pool, PEPPER, HASH_COST);

    // create preserves the name fields and stores a peppered digest
    let created = store.create(mock_user()).await?;
    assert_eq!(created.first_name, "mock");
    assert_eq!(created.last_name, "name");
    assert_eq!(created.user_name, "mock_u");
    assert_ne!(created.password_digest, "mock_pass");
    assert!(verify_password("mock_pass", PEPPER, &created.password_digest)?);

    // authenticate with the original credentials returns the same record
    let authed = store.authenticate("mock_u", "mock_pass").await?;
    assert_eq!(authed.id, created.id);
    assert_eq!(authed.user_name, created.user_name);

    // wrong password and unknown username fail identically
    let err = store
        .authenticate("mock_u", "wrong")
        .await
        .expect_err("wrong password must fail");
    assert!(matches!(err, UserStoreError::InvalidCredentials));
    let err = store
        .authenticate("nobody", "mock_pass")
        .await
        .expect_err("unknown username must fail");
    assert!(matches!(err, UserStoreError::InvalidCredentials));

    // duplicate signup fails and performs no insert
    let before = store.list().await?.len();
    let err = store
        .create(mock_user())
        .await
        .expect_err("duplicate username must fail");
    assert!(matches!(err, UserStoreError::DuplicateUsername(_)));
    assert_eq!(store.list().await?.len(), before);

    // deleting an absent username is not an error
    assert!(store.delete("nobody").await?.is_none());

    // deleting the user removes exactly one record
    let removed = store.delete("mock_u").await?.expect("user removed");
    assert_eq!(removed.id, created.id);
    assert!(store.list().await?.is_empty());

    db.teardown().await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
#[cfg_attr(
    not(feature = "integration"),
    ignore = "enable with --features integration (requires Postgres: embedded or external)"
)]
async fn list_and_get_follow_insertion_order() -> Result<()> {
    let Some(db) = TestDatabase::setup().await? else {
        return Ok(());
    };
    let pool = db.pool_clone();
    reset_tables(&pool).await?;

    let store = UserStore::new(pool, PEPPER, HASH_COST);

    let first = store
        .create(NewUser {
            first_name: "mock0".to_string(),
            last_name: "name0".to_string(),
            user_name: "mock0_u".to_string(),
            password: "mock0_pass".to_string(),
        })
        .await?;
    let second = store.create(mock_user()).await?;

    let users = store.list().await?;
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, first.id);
    assert_eq!(users[1].id, second.id);

    let found = store.get("mock_u").await?.expect("user found");
    assert_eq!(found.id, second.id);
    assert!(store.get("absent_u").await?.is_none());

    store.delete("mock0_u").await?;
    store.delete("mock_u").await?;
    assert!(store.list().await?.is_empty());

    db.teardown().await?;
    Ok(())
}
