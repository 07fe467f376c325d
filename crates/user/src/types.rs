use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::repository::UserRepository;

/// Opaque user identity. Immutable once assigned, equality by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum CredentialAlgorithm {
    #[default]
    Argon2id,
    Bcrypt,
    Legacy,
}

/// Password hash plus the algorithm it was produced with. The aggregate
/// holds exactly one current credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub password_hash: String,
    pub algorithm: CredentialAlgorithm,
}

impl Credential {
    pub fn new(password_hash: impl Into<String>, algorithm: CredentialAlgorithm) -> Self {
        Self {
            password_hash: password_hash.into(),
            algorithm,
        }
    }
}

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum ConfirmationStatus {
    #[default]
    Unconfirmed,
    Confirmed,
}

/// Email address owned by a user. The `user` field is a back-reference
/// only; dropping the value object never deletes the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    pub user: UserId,
    pub primary: bool,
}

/// Pending password-reset request recorded on the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub token: String,
    pub requested_at: chrono::DateTime<chrono::Utc>,
}

/// Identity-holding reference to a user in another aggregate. Resolution
/// is an explicit repository call, never triggered by field access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    id: UserId,
}

impl UserRef {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub async fn resolve<R: UserRepository>(
        &self,
        repository: &R,
    ) -> accounts_shared::Result<crate::User> {
        repository.find(&self.id).await
    }
}

/// Username literal together with a reference to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username {
    pub username: String,
    pub user: UserRef,
}
