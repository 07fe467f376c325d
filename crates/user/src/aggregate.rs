use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::UserEvent;
use crate::types::{ConfirmationStatus, Credential, Email, PasswordRequest, UserId};

/// Result of applying a domain event to the aggregate.
///
/// `AlreadySatisfied` means the precondition already holds (a documented
/// no-op), `Refused` means the transition is not valid from the current
/// state. Neither mutates the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    AlreadySatisfied,
    Refused,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The User aggregate. The sole place business invariants are enforced:
/// at most one current credential, at most one primary email, confirmation
/// only ever moves Unconfirmed -> Confirmed.
///
/// All mutation goes through [`User::apply`]; handlers persist and publish
/// only when apply reports [`Outcome::Applied`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    credential: Credential,
    confirmation: ConfirmationStatus,
    confirmation_token: Option<String>,
    enabled: bool,
    emails: Vec<Email>,
    password_request: Option<PasswordRequest>,
}

impl User {
    /// A freshly registered user: unconfirmed, enabled, pending token,
    /// no secondary emails. Registration itself happens upstream.
    pub fn new(id: UserId, credential: Credential) -> Self {
        Self {
            id,
            credential,
            confirmation: ConfirmationStatus::Unconfirmed,
            confirmation_token: Some(Uuid::new_v4().to_string()),
            enabled: true,
            emails: Vec::new(),
            password_request: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation == ConfirmationStatus::Confirmed
    }

    pub fn confirmation_token(&self) -> Option<&str> {
        self.confirmation_token.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn owns_email(&self, address: &str) -> bool {
        self.emails.iter().any(|e| e.address == address)
    }

    pub fn primary_email(&self) -> Option<&Email> {
        self.emails.iter().find(|e| e.primary)
    }

    pub fn password_request(&self) -> Option<&PasswordRequest> {
        self.password_request.as_ref()
    }

    /// Decides whether the transition described by `event` is legal from
    /// the current state and, if so, performs it. Decision and mutation
    /// stay colocated so no caller can race a check against an apply.
    /// Never mutates on a non-`Applied` outcome.
    pub fn apply(&mut self, event: UserEvent) -> Outcome {
        match event {
            UserEvent::Confirm => {
                if self.confirmation == ConfirmationStatus::Confirmed {
                    return Outcome::AlreadySatisfied;
                }
                self.confirmation = ConfirmationStatus::Confirmed;
                self.confirmation_token = None;
                Outcome::Applied
            }
            UserEvent::Enable => {
                if self.enabled {
                    return Outcome::AlreadySatisfied;
                }
                self.enabled = true;
                Outcome::Applied
            }
            UserEvent::Disable => {
                if !self.enabled {
                    return Outcome::AlreadySatisfied;
                }
                self.enabled = false;
                Outcome::Applied
            }
            UserEvent::ChangeCredential {
                password_hash,
                algorithm,
            } => {
                let next = Credential::new(password_hash, algorithm);
                if self.credential == next {
                    return Outcome::AlreadySatisfied;
                }
                self.credential = next;
                Outcome::Applied
            }
            UserEvent::RequestPassword {
                token,
                requested_at,
            } => {
                if self
                    .password_request
                    .as_ref()
                    .is_some_and(|r| r.token == token)
                {
                    return Outcome::AlreadySatisfied;
                }
                self.password_request = Some(PasswordRequest {
                    token,
                    requested_at,
                });
                Outcome::Applied
            }
            UserEvent::AddEmail { address } => {
                if self.owns_email(&address) {
                    return Outcome::AlreadySatisfied;
                }
                self.emails.push(Email {
                    address,
                    user: self.id,
                    primary: false,
                });
                Outcome::Applied
            }
            UserEvent::RemoveEmail { address } => {
                let before = self.emails.len();
                self.emails.retain(|e| e.address != address);
                if self.emails.len() == before {
                    Outcome::AlreadySatisfied
                } else {
                    Outcome::Applied
                }
            }
            UserEvent::MarkEmailPrimary { address } => {
                let Some(target) = self.emails.iter().position(|e| e.address == address) else {
                    return Outcome::Refused;
                };
                if self.emails[target].primary {
                    return Outcome::AlreadySatisfied;
                }
                for email in &mut self.emails {
                    email.primary = false;
                }
                self.emails[target].primary = true;
                Outcome::Applied
            }
        }
    }
}
