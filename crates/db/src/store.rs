//! The document store seam used by the HTTP handlers.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};
use crate::models::contact::{Contact, CreateContact};
use crate::models::project::{CreateProject, Project};
use crate::models::subscriber::{CreateSubscriber, Subscriber};
use crate::repositories::{ClientRepo, ContactRepo, ProjectRepo, SubscriberRepo};

/// Create and list operations for every landing page document.
///
/// Lists are ordered newest first. Implementations must be safe to share
/// across request tasks.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_client(&self, input: &CreateClient) -> Result<Client, sqlx::Error>;
    async fn list_clients(&self) -> Result<Vec<Client>, sqlx::Error>;

    async fn create_project(&self, input: &CreateProject) -> Result<Project, sqlx::Error>;
    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error>;

    async fn create_contact(&self, input: &CreateContact) -> Result<Contact, sqlx::Error>;
    async fn list_contacts(&self) -> Result<Vec<Contact>, sqlx::Error>;

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error>;
    /// Insert a subscriber, or `None` if the email is already subscribed.
    async fn create_subscriber(
        &self,
        input: &CreateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error>;
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, sqlx::Error>;

    /// Check that the backing database is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`Store`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_client(&self, input: &CreateClient) -> Result<Client, sqlx::Error> {
        ClientRepo::create(&self.pool, input).await
    }

    async fn list_clients(&self) -> Result<Vec<Client>, sqlx::Error> {
        ClientRepo::list(&self.pool).await
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, sqlx::Error> {
        ProjectRepo::create(&self.pool, input).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, sqlx::Error> {
        ProjectRepo::list(&self.pool).await
    }

    async fn create_contact(&self, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        ContactRepo::create(&self.pool, input).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, sqlx::Error> {
        ContactRepo::list(&self.pool).await
    }

    async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        SubscriberRepo::find_by_email(&self.pool, email).await
    }

    async fn create_subscriber(
        &self,
        input: &CreateSubscriber,
    ) -> Result<Option<Subscriber>, sqlx::Error> {
        SubscriberRepo::create(&self.pool, input).await
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>, sqlx::Error> {
        SubscriberRepo::list(&self.pool).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
