//! In-process [`Store`] used by the integration tests and for running the
//! server without PostgreSQL.
//!
//! Ids are assigned from a single counter, so insertion order equals id
//! order and "newest first" is simply the reverse of insertion.

use async_trait::async_trait;
use chrono::Utc;
use landing_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::client::{Client, CreateClient};
use crate::models::contact::{Contact, CreateContact};
use crate::models::project::{CreateProject, Project};
use crate::models::subscriber::{CreateSubscriber, Subscriber};
use crate::store::Store;

#[derive(Debug, Default)]
struct Collections {
    last_id: DbId,
    clients: Vec<Client>,
    projects: Vec<Project>,
    contacts: Vec<Contact>,
    subscribers: Vec<Subscriber>,
}

impl Collections {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }
}

fn newest_first<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().rev().cloned().collect()
}

/// A [`Store`] holding every document in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_client(&self, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let client = Client {
            id: inner.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            designation: input.designation.clone(),
            image: input.image.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.clients.push(client.clone());
        Ok(client)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, sqlx::Error> {
        Ok(newest_first(&self.inner.read().await.clients))
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let project = Project {
            id: inner.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            image: input.image.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        Ok(newest_first(&self.inner.read().await.projects))
    }

    async fn create_contact(&self, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let contact = Contact {
            id: inner.next_id(),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            mobile: input.mobile.clone(),
            city: input.city.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, sqlx::Error> {
        Ok(newest_first(&self.inner.read().await.contacts))
    }

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let inner = self.inner.read().await;
        Ok(inner.subscribers.iter().find(|s| s.email == email).cloned())
    }

    async fn create_subscriber(
        &self,
        input: &CreateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        if inner.subscribers.iter().any(|s| s.email == input.email) {
            return Ok(None);
        }
        let now = Utc::now();
        let subscriber = Subscriber {
            id: inner.next_id(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.subscribers.push(subscriber.clone());
        Ok(Some(subscriber))
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, sqlx::Error> {
        Ok(newest_first(&self.inner.read().await.subscribers))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
