use accounts_shared::{MessageBus, Metadata, Result};
use serde_json::json;

use crate::aggregate::Outcome;
use crate::event::{EventFactory, EventKind};
use crate::repository::UserRepository;

use super::MarkUserSecondaryEmailPrimaryCommand;

impl<R: UserRepository, B: MessageBus, F: EventFactory> super::Command<R, B, F> {
    /// Repoints the primary flag onto `command.email`. When the commanded
    /// user does not own the address, ownership is resolved through the
    /// repository and the change lands on the owning aggregate instead.
    #[tracing::instrument(skip(self, metadata), fields(user_id = %command.user_id))]
    pub async fn mark_secondary_email_primary(
        &self,
        command: MarkUserSecondaryEmailPrimaryCommand,
        metadata: Metadata,
    ) -> Result<Outcome> {
        let mut user = self.repository.find(&command.user_id).await?;
        if !user.owns_email(&command.email) {
            user = self.repository.find_by_email(&command.email).await?;
        }

        let event = self
            .factory
            .create(EventKind::MarkEmailPrimary, json!({"address": command.email}))?;

        self.execute(&mut user, event, "UserSecondaryEmailMarkedPrimary", metadata)
            .await
    }
}
