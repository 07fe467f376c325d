use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use accounts_shared::{IntegrationEvent, MessageBus, Result};
use accounts_user::{
    Command, Credential, CredentialAlgorithm, DomainEventFactory, MemoryUserRepository, User,
    UserId, UserRepository,
};

/// Shared call journal so tests can assert the save-then-dispatch order
/// across both collaborators.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct JournalRepository {
    inner: MemoryUserRepository,
    journal: Journal,
}

impl JournalRepository {
    pub async fn insert(&self, user: User) {
        self.inner.insert(user).await;
    }
}

#[async_trait]
impl UserRepository for JournalRepository {
    async fn find(&self, id: &UserId) -> Result<User> {
        self.inner.find(id).await
    }

    async fn find_by_email(&self, address: &str) -> Result<User> {
        self.inner.find_by_email(address).await
    }

    async fn save(&self, user: &User) -> Result<()> {
        self.journal.record(format!("save:{}", user.id()));
        self.inner.save(user).await
    }
}

#[derive(Default)]
pub struct JournalBus {
    journal: Journal,
    events: Mutex<Vec<IntegrationEvent>>,
}

impl JournalBus {
    #[allow(dead_code)]
    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.name.to_owned())
            .collect()
    }

    #[allow(dead_code)]
    pub fn events(&self) -> Vec<IntegrationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageBus for JournalBus {
    async fn dispatch(&self, event: IntegrationEvent) -> Result<()> {
        self.journal.record(format!("dispatch:{}", event.name));
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestContext {
    pub cmd: Command<Arc<JournalRepository>, Arc<JournalBus>, DomainEventFactory>,
    pub repository: Arc<JournalRepository>,
    pub bus: Arc<JournalBus>,
    pub journal: Journal,
}

pub fn setup() -> TestContext {
    let journal = Journal::default();
    let repository = Arc::new(JournalRepository {
        inner: MemoryUserRepository::new(),
        journal: journal.clone(),
    });
    let bus = Arc::new(JournalBus {
        journal: journal.clone(),
        events: Mutex::new(Vec::new()),
    });
    let cmd = Command::new(repository.clone(), bus.clone(), DomainEventFactory::new());

    TestContext {
        cmd,
        repository,
        bus,
        journal,
    }
}

pub async fn seed_user(repository: &JournalRepository) -> UserId {
    let id = UserId::new();
    repository
        .insert(User::new(
            id,
            Credential::new("$argon2id$seed", CredentialAlgorithm::Argon2id),
        ))
        .await;
    id
}
