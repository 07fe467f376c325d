use accounts_shared::Metadata;
use accounts_user::{DisableUser, EnableUser, Outcome, UserRepository};

mod helpers;

#[tokio::test]
async fn disable_then_enable_round_trip() -> anyhow::Result<()> {
    let ctx = helpers::setup();
    let user_id = helpers::seed_user(&ctx.repository).await;

    // already enabled
    let outcome = ctx
        .cmd
        .enable(EnableUser { user_id }, Metadata::default())
        .await?;
    assert_eq!(outcome, Outcome::AlreadySatisfied);

    let outcome = ctx
        .cmd
        .disable(DisableUser { user_id }, Metadata::new("admin"))
        .await?;
    assert_eq!(outcome, Outcome::Applied);
    assert!(!ctx.repository.find(&user_id).await?.is_enabled());

    let outcome = ctx
        .cmd
        .disable(DisableUser { user_id }, Metadata::new("admin"))
        .await?;
    assert_eq!(outcome, Outcome::AlreadySatisfied);

    let outcome = ctx
        .cmd
        .enable(EnableUser { user_id }, Metadata::new("admin"))
        .await?;
    assert_eq!(outcome, Outcome::Applied);
    assert!(ctx.repository.find(&user_id).await?.is_enabled());

    assert_eq!(ctx.bus.names(), vec!["UserDisabled", "UserEnabled"]);
    let events = ctx.bus.events();
    assert_eq!(events[0].metadata.requested_by, "admin");

    Ok(())
}
