use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::Value;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::ConfirmUser;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    #[tracing::instrument(skip(self, metadata), fields(user_id = %command.user_id))]
    pub async fn confirm(&self, command: ConfirmUser, metadata: Metadata) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self.factory.create(EventKind::Confirm, Value::Null)?;

        self.execute(&mut user, event, "UserConfirmed", metadata)
            .await
    }
}
