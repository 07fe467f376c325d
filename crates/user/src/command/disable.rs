use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::Value;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::DisableUser;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn disable(&self, command: DisableUser, metadata: Metadata) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self.factory.create(EventKind::Disable, Value::Null)?;

        self.execute(&mut user, event, "UserDisabled", metadata)
            .await
    }
}
