use accounts_shared::{IntegrationEvent, MessageBus, Metadata, Result};

use crate::aggregate::{Outcome, User};
use crate::event::{DomainEventFactory, EventFactory, UserEvent};
use crate::repository::UserRepository;
use crate::types::{CredentialAlgorithm, UserId};

mod add_email;
mod change_credential;
mod confirm;
mod disable;
mod enable;
mod mark_email_primary;
mod remove_email;
mod request_password;

// Command DTOs: plain immutable requests. Validation happens at the
// boundary that produced them, construction checks in the event factory.

#[derive(Debug, Clone)]
pub struct ConfirmUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct EnableUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct DisableUser {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ChangeUserCredential {
    pub user_id: UserId,
    pub password_hash: String,
    pub algorithm: CredentialAlgorithm,
}

#[derive(Debug, Clone)]
pub struct RequestUserPassword {
    pub user_id: UserId,
    /// Explicit reset token; the factory mints one when absent.
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddUserEmail {
    pub user_id: UserId,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct DeleteUserEmail {
    pub user_id: UserId,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct MarkUserSecondaryEmailPrimaryCommand {
    pub user_id: UserId,
    pub email: String,
}

/// One entry point per use case, with the collaborators injected up
/// front. Every handler follows the same shape: load, build the event,
/// apply, and on [`Outcome::Applied`] persist then publish, in that
/// order, so subscribers only ever observe already-persisted state.
pub struct Command<R, B, F = DomainEventFactory> {
    repository: R,
    bus: B,
    factory: F,
}

impl<R, B, F> Command<R, B, F>
where
    R: UserRepository,
    B: MessageBus,
    F: EventFactory,
{
    pub fn new(repository: R, bus: B, factory: F) -> Self {
        Self {
            repository,
            bus,
            factory,
        }
    }

    async fn execute(
        &self,
        user: &mut User,
        event: UserEvent,
        integration: &str,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let outcome = user.apply(event);

        if outcome.is_applied() {
            self.repository.save(user).await?;
            self.bus
                .dispatch(IntegrationEvent::new(integration, metadata).with("user", &*user)?)
                .await?;
            tracing::info!(user_id = %user.id(), integration, "command applied");
        } else {
            tracing::debug!(user_id = %user.id(), integration, ?outcome, "state unchanged");
        }

        Ok(outcome)
    }
}
