use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::json;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::types::UserId;

use super::ChangeUserCredential;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn change_credential(
        &self,
        command: ChangeUserCredential,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self.factory.create(
            EventKind::ChangeCredential,
            json!({
                "password_hash": command.password_hash,
                "algorithm": command.algorithm,
            }),
        )?;

        self.execute(&mut user, event, "UserCredentialChanged", metadata)
            .await
    }

    /// Hashes a plain password through the given adapter and routes the
    /// result as a credential change.
    pub async fn change_password(
        &self,
        user_id: UserId,
        plain: &str,
        hasher: &impl PasswordHasher,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let command = ChangeUserCredential {
            user_id,
            password_hash: hasher.hash(plain)?,
            algorithm: hasher.algorithm(),
        };

        self.change_credential(command, metadata).await
    }
}
