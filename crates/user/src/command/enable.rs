use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::Value;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::EnableUser;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    pub async fn enable(&self, command: EnableUser, metadata: Metadata) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        let event = self.factory.create(EventKind::Enable, Value::Null)?;

        self.execute(&mut user, event, "UserEnabled", metadata).await
    }
}
