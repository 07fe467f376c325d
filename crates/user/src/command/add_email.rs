use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::json;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::AddUserEmail;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn add_email(&self, command: AddUserEmail, metadata: Metadata) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self
            .factory
            .create(EventKind::AddEmail, json!({"address": command.email}))?;

        self.execute(&mut user, event, "UserEmailAdded", metadata)
            .await
    }
}
