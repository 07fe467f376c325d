use accounts_shared::Metadata;
use accounts_user::{Outcome, RequestUserPassword, UserRepository};

mod helpers;

#[tokio::test]
async fn request_password_mints_a_token_when_absent() -> anyhow::Result<()> {
    let ctx = helpers::setup();
    let user_id = helpers::seed_user(&ctx.repository).await;

    let outcome = ctx
        .cmd
        .request_password(
            RequestUserPassword {
                user_id,
                token: None,
            },
            Metadata::default(),
        )
        .await?;
    assert_eq!(outcome, Outcome::Applied);

    let user = ctx.repository.find(&user_id).await?;
    let request = user.password_request().expect("request recorded");
    assert!(!request.token.is_empty());
    assert_eq!(ctx.bus.names(), vec!["UserPasswordRequested"]);

    Ok(())
}

#[tokio::test]
async fn repeated_request_with_same_token_publishes_once() -> anyhow::Result<()> {
    let ctx = helpers::setup();
    let user_id = helpers::seed_user(&ctx.repository).await;

    let command = RequestUserPassword {
        user_id,
        token: Some("tok-1".to_owned()),
    };

    let outcome = ctx
        .cmd
        .request_password(command.clone(), Metadata::default())
        .await?;
    assert_eq!(outcome, Outcome::Applied);

    let outcome = ctx
        .cmd
        .request_password(command, Metadata::default())
        .await?;
    assert_eq!(outcome, Outcome::AlreadySatisfied);

    let user = ctx.repository.find(&user_id).await?;
    assert_eq!(user.password_request().map(|r| r.token.as_str()), Some("tok-1"));
    assert_eq!(ctx.bus.names(), vec!["UserPasswordRequested"]);

    Ok(())
}
