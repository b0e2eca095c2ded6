//! User adapter tests.

use super::helpers::{database, unique_email};
use crate::test_helpers::FixedClock;
use smart_todo::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{EmailAddress, NewUser, UserName},
    ports::{UserRepository, UserRepositoryError},
};

#[tokio::test(flavor = "multi_thread")]
async fn stored_user_round_trips_through_both_lookups() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let repo = PostgresUserRepository::new(pool);
    let email = EmailAddress::new(unique_email("lookup")).expect("valid email");

    let user = repo
        .create(NewUser::new(
            email.clone(),
            UserName::new("Grace").expect("valid name"),
            &clock,
        ))
        .await
        .expect("create");

    let by_email = repo.find_by_email(&email).await.expect("lookup");
    let by_id = repo.find_by_id(user.id()).await.expect("lookup");
    assert_eq!(by_email.as_ref(), Some(&user));
    assert_eq!(by_id.as_ref(), Some(&user));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_maps_to_domain_error() {
    let Some(pool) = database().await else {
        return;
    };
    let clock = FixedClock::standard();
    let repo = PostgresUserRepository::new(pool);
    let email = unique_email("duplicate");
    let make = || {
        NewUser::new(
            EmailAddress::new(email.as_str()).expect("valid email"),
            UserName::new("Grace").expect("valid name"),
            &clock,
        )
    };

    repo.create(make()).await.expect("first create");
    let result = repo.create(make()).await;

    assert!(matches!(result, Err(UserRepositoryError::DuplicateEmail(_))));
}
