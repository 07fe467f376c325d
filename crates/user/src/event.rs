use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

use accounts_shared::{Error, Result};

use crate::types::CredentialAlgorithm;

/// Domain events: immutable descriptions of an intended state transition,
/// constructed fresh per command invocation. A closed enum so the
/// aggregate's dispatch stays exhaustive; adding a kind means adding a
/// variant and a match arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum UserEvent {
    Confirm,
    Enable,
    Disable,
    ChangeCredential {
        password_hash: String,
        algorithm: CredentialAlgorithm,
    },
    RequestPassword {
        token: String,
        requested_at: DateTime<Utc>,
    },
    AddEmail {
        address: String,
    },
    RemoveEmail {
        address: String,
    },
    MarkEmailPrimary {
        address: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum EventKind {
    Confirm,
    Enable,
    Disable,
    ChangeCredential,
    RequestPassword,
    AddEmail,
    RemoveEmail,
    MarkEmailPrimary,
}

/// Builds typed domain events from plain data. Pure construction: no side
/// effects, no aggregate or repository access, mockable independently of
/// both.
pub trait EventFactory: Send + Sync {
    fn create(&self, kind: EventKind, data: Value) -> Result<UserEvent>;
}

#[derive(Debug, Validate, Deserialize)]
struct ChangeCredentialData {
    #[validate(length(min = 1))]
    password_hash: String,
    #[serde(default)]
    algorithm: Option<CredentialAlgorithm>,
}

#[derive(Debug, Deserialize)]
struct RequestPasswordData {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Validate, Deserialize)]
struct EmailData {
    #[validate(email)]
    address: String,
}

/// Default factory. Malformed data surfaces as
/// [`Error::Construction`] or [`Error::Validate`], fatal for the
/// invocation that supplied it.
#[derive(Debug, Default, Clone)]
pub struct DomainEventFactory;

impl DomainEventFactory {
    pub fn new() -> Self {
        Self
    }
}

impl EventFactory for DomainEventFactory {
    fn create(&self, kind: EventKind, data: Value) -> Result<UserEvent> {
        let event = match kind {
            EventKind::Confirm => {
                expect_empty(kind, &data)?;
                UserEvent::Confirm
            }
            EventKind::Enable => {
                expect_empty(kind, &data)?;
                UserEvent::Enable
            }
            EventKind::Disable => {
                expect_empty(kind, &data)?;
                UserEvent::Disable
            }
            EventKind::ChangeCredential => {
                let data: ChangeCredentialData = parse(data)?;
                data.validate()?;
                UserEvent::ChangeCredential {
                    password_hash: data.password_hash,
                    algorithm: data.algorithm.unwrap_or_default(),
                }
            }
            EventKind::RequestPassword => {
                let data: RequestPasswordData = parse(data)?;
                UserEvent::RequestPassword {
                    token: data.token.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    requested_at: Utc::now(),
                }
            }
            EventKind::AddEmail => UserEvent::AddEmail {
                address: email_address(data)?,
            },
            EventKind::RemoveEmail => UserEvent::RemoveEmail {
                address: email_address(data)?,
            },
            EventKind::MarkEmailPrimary => UserEvent::MarkEmailPrimary {
                address: email_address(data)?,
            },
        };

        Ok(event)
    }
}

fn parse<T: DeserializeOwned>(data: Value) -> Result<T> {
    // null counts as "no data", same as an empty object
    let data = match data {
        Value::Null => Value::Object(serde_json::Map::new()),
        data => data,
    };
    serde_json::from_value(data).map_err(|e| Error::Construction(e.to_string()))
}

fn email_address(data: Value) -> Result<String> {
    let data: EmailData = parse(data)?;
    data.validate()?;
    Ok(data.address)
}

fn expect_empty(kind: EventKind, data: &Value) -> Result<()> {
    let empty = data.is_null() || data.as_object().is_some_and(|m| m.is_empty());
    if !empty {
        return Err(Error::Construction(format!(
            "{kind} takes no data, got {data}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_events_from_plain_data() {
        let factory = DomainEventFactory::new();

        assert_eq!(
            factory.create(EventKind::Confirm, Value::Null).unwrap(),
            UserEvent::Confirm
        );

        let event = factory
            .create(
                EventKind::ChangeCredential,
                json!({"password_hash": "$2y$abc", "algorithm": "Bcrypt"}),
            )
            .unwrap();
        assert_eq!(
            event,
            UserEvent::ChangeCredential {
                password_hash: "$2y$abc".into(),
                algorithm: CredentialAlgorithm::Bcrypt,
            }
        );

        let event = factory
            .create(EventKind::AddEmail, json!({"address": "a@example.com"}))
            .unwrap();
        assert_eq!(
            event,
            UserEvent::AddEmail {
                address: "a@example.com".into()
            }
        );
    }

    #[test]
    fn algorithm_defaults_when_omitted() {
        let event = DomainEventFactory::new()
            .create(EventKind::ChangeCredential, json!({"password_hash": "h"}))
            .unwrap();
        assert!(matches!(
            event,
            UserEvent::ChangeCredential {
                algorithm: CredentialAlgorithm::Argon2id,
                ..
            }
        ));
    }

    #[test]
    fn request_password_fills_a_fresh_token() {
        let factory = DomainEventFactory::new();
        let UserEvent::RequestPassword { token, .. } =
            factory.create(EventKind::RequestPassword, Value::Null).unwrap()
        else {
            panic!("wrong event kind");
        };
        assert!(!token.is_empty());

        let UserEvent::RequestPassword { token, .. } = factory
            .create(EventKind::RequestPassword, json!({"token": "tok-9"}))
            .unwrap()
        else {
            panic!("wrong event kind");
        };
        assert_eq!(token, "tok-9");
    }

    #[test]
    fn malformed_data_is_a_construction_failure() {
        let factory = DomainEventFactory::new();

        let err = factory
            .create(EventKind::ChangeCredential, json!({"nope": true}))
            .unwrap_err();
        assert!(matches!(err, Error::Construction(_)));

        let err = factory
            .create(EventKind::AddEmail, json!({"address": "not-an-email"}))
            .unwrap_err();
        assert!(matches!(err, Error::Validate(_)));

        let err = factory
            .create(EventKind::Confirm, json!({"unexpected": 1}))
            .unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }
}
