//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

pub const USERS_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>(USERS_COLLECTION);
        Self { collection }
    }

    /// Create the unique indexes on username and email. Idempotent;
    /// called at startup.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let unique = IndexOptions::builder().unique(true).build();

        let username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(unique.clone())
            .build();
        let email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique)
            .build();

        self.collection.create_index(username).await?;
        self.collection.create_index(email).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let user = self.collection.find_one(filter).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_active_by_identifier(&self, identifier: &str) -> UserResult<Option<User>> {
        let filter = doc! {
            "$or": [
                { "email": identifier },
                { "username": identifier },
            ],
            "is_active": true,
        };
        let user = self.collection.find_one(filter).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "username": username })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }
}
