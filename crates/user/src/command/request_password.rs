use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::json;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::RequestUserPassword;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn request_password(
        &self,
        command: RequestUserPassword,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self
            .factory
            .create(EventKind::RequestPassword, json!({"token": command.token}))?;

        self.execute(&mut user, event, "UserPasswordRequested", metadata)
            .await
    }
}
