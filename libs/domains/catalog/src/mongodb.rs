//! MongoDB implementations of the catalog repositories

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Banner, BannerFilter, Category, CategoryFilter, Event, EventFilter, UpdateBanner,
    UpdateCategory, UpdateEvent,
};
use crate::repository::{BannerRepository, CategoryRepository, EventRepository};

pub const CATEGORIES_COLLECTION: &str = "categories";
pub const EVENTS_COLLECTION: &str = "events";
pub const BANNERS_COLLECTION: &str = "banners";

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
}

fn page_options(limit: i64, skip: u64) -> FindOptions {
    FindOptions::builder()
        .limit(limit)
        .skip(skip)
        .sort(doc! { "created_at": -1 })
        .build()
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Category>(CATEGORIES_COLLECTION);
        Self { collection }
    }

    /// Category search is a case-insensitive regex over name and
    /// description rather than a text index.
    fn build_filter(filter: &CategoryFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref search) = filter.search {
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": search, "$options": "i" } },
                    doc! { "description": { "$regex": search, "$options": "i" } },
                ],
            );
        }

        doc
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(name = %category.name))]
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        self.collection.insert_one(&category).await?;
        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let category = self.collection.find_one(id_filter(id)).await?;
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>> {
        let mongo_filter = Self::build_filter(&filter);
        let options = page_options(filter.page_size(), filter.skip());

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let categories: Vec<Category> = cursor.try_collect().await?;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: CategoryFilter) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: UpdateCategory) -> CatalogResult<Category> {
        let filter = id_filter(id);
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut updated = existing;
        updated.apply_update(update);

        self.collection.replace_one(filter, &updated).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<Category> {
        let deleted = self
            .collection
            .find_one_and_delete(id_filter(id))
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        tracing::info!(category_id = %id, "Category deleted");
        Ok(deleted)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// MongoDB implementation of the EventRepository
pub struct MongoEventRepository {
    collection: Collection<Event>,
}

impl MongoEventRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Event>(EVENTS_COLLECTION);
        Self { collection }
    }

    /// Create the unique slug index and the text index backing search.
    /// Idempotent; called at startup.
    pub async fn ensure_indexes(&self) -> CatalogResult<()> {
        let slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let text = IndexModel::builder()
            .keys(doc! { "name": "text", "description": "text" })
            .build();

        self.collection.create_index(slug).await?;
        self.collection.create_index(text).await?;
        Ok(())
    }

    fn build_filter(filter: &EventFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref search) = filter.search {
            doc.insert("$text", doc! { "$search": search });
        }
        if let Some(category) = filter.category {
            doc.insert("category", to_bson(&category).unwrap_or(Bson::Null));
        }
        if let Some(is_online) = filter.is_online {
            doc.insert("isOnline", is_online);
        }
        if let Some(is_featured) = filter.is_featured {
            doc.insert("isFeatured", is_featured);
        }
        if let Some(is_publish) = filter.is_publish {
            doc.insert("isPublish", is_publish);
        }

        doc
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self, event), fields(slug = %event.slug))]
    async fn insert(&self, event: Event) -> CatalogResult<Event> {
        self.collection.insert_one(&event).await?;
        tracing::info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Event>> {
        let event = self.collection.find_one(id_filter(id)).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Event>> {
        let event = self.collection.find_one(doc! { "slug": slug }).await?;
        Ok(event)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: EventFilter) -> CatalogResult<Vec<Event>> {
        let mongo_filter = Self::build_filter(&filter);
        let options = page_options(filter.page_size(), filter.skip());

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let events: Vec<Event> = cursor.try_collect().await?;

        Ok(events)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: EventFilter) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: UpdateEvent) -> CatalogResult<Event> {
        let filter = id_filter(id);
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;

        let mut updated = existing;
        updated.apply_update(update);

        self.collection.replace_one(filter, &updated).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<Event> {
        let deleted = self
            .collection
            .find_one_and_delete(id_filter(id))
            .await?
            .ok_or(CatalogError::EventNotFound(id))?;

        tracing::info!(event_id = %id, "Event deleted");
        Ok(deleted)
    }
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

/// MongoDB implementation of the BannerRepository
pub struct MongoBannerRepository {
    collection: Collection<Banner>,
}

impl MongoBannerRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Banner>(BANNERS_COLLECTION);
        Self { collection }
    }

    /// Create the text index backing search. Idempotent; called at startup.
    pub async fn ensure_indexes(&self) -> CatalogResult<()> {
        let text = IndexModel::builder()
            .keys(doc! { "title": "text" })
            .build();
        self.collection.create_index(text).await?;
        Ok(())
    }

    fn build_filter(filter: &BannerFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref search) = filter.search {
            doc.insert("$text", doc! { "$search": search });
        }

        doc
    }
}

#[async_trait]
impl BannerRepository for MongoBannerRepository {
    #[instrument(skip(self, banner), fields(title = %banner.title))]
    async fn insert(&self, banner: Banner) -> CatalogResult<Banner> {
        self.collection.insert_one(&banner).await?;
        tracing::info!(banner_id = %banner.id, "Banner created");
        Ok(banner)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Banner>> {
        let banner = self.collection.find_one(id_filter(id)).await?;
        Ok(banner)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: BannerFilter) -> CatalogResult<Vec<Banner>> {
        let mongo_filter = Self::build_filter(&filter);
        let options = page_options(filter.page_size(), filter.skip());

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let banners: Vec<Banner> = cursor.try_collect().await?;

        Ok(banners)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: BannerFilter) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: Uuid, update: UpdateBanner) -> CatalogResult<Banner> {
        let filter = id_filter(id);
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CatalogError::BannerNotFound(id))?;

        let mut updated = existing;
        updated.apply_update(update);

        self.collection.replace_one(filter, &updated).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<Banner> {
        let deleted = self
            .collection
            .find_one_and_delete(id_filter(id))
            .await?
            .ok_or(CatalogError::BannerNotFound(id))?;

        tracing::info!(banner_id = %id, "Banner deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_builds_regex_or() {
        let filter = CategoryFilter {
            search: Some("music".to_string()),
            ..Default::default()
        };
        let doc = MongoCategoryRepository::build_filter(&filter);
        let or = doc.get_array("$or").unwrap();
        assert_eq!(or.len(), 2);
    }

    #[test]
    fn event_filter_combines_flags_and_text() {
        let filter = EventFilter {
            search: Some("meetup".to_string()),
            is_publish: Some(true),
            is_online: Some(false),
            ..Default::default()
        };
        let doc = MongoEventRepository::build_filter(&filter);
        assert_eq!(
            doc.get_document("$text").unwrap().get_str("$search").unwrap(),
            "meetup"
        );
        assert!(doc.get_bool("isPublish").unwrap());
        assert!(!doc.get_bool("isOnline").unwrap());
        assert!(doc.get("isFeatured").is_none());
    }

    #[test]
    fn banner_filter_empty_without_search() {
        let doc = MongoBannerRepository::build_filter(&BannerFilter::default());
        assert!(doc.is_empty());
    }
}
