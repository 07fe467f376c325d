use async_trait::async_trait;

use accounts_shared::Result;

use crate::types::{UserId, UserRef, Username};

/// Supplies (username, owner id) pairs from wherever usernames actually
/// live, typically one or more read-model tables.
#[async_trait]
pub trait UsernameSource: Send + Sync {
    async fn entries(&self) -> Result<Vec<(String, UserId)>>;
}

/// Collects every known username as a value object holding an explicit
/// owner reference. Owners are never loaded here; callers resolve a
/// [`UserRef`] against the repository when they need the aggregate.
pub struct UsernameLookup<S> {
    source: S,
}

impl<S: UsernameSource> UsernameLookup<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn lookup(&self) -> Result<Vec<Username>> {
        Ok(self
            .source
            .entries()
            .await?
            .into_iter()
            .map(|(username, id)| Username {
                username,
                user: UserRef::new(id),
            })
            .collect())
    }
}
