use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::json;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::DeleteUserEmail;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn remove_email(
        &self,
        command: DeleteUserEmail,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self
            .factory
            .create(EventKind::RemoveEmail, json!({"address": command.email}))?;

        self.execute(&mut user, event, "UserEmailRemoved", metadata)
            .await
    }
}
