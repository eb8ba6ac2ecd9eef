use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Banner, BannerFilter, Category, CategoryFilter, Event, EventFilter, UpdateBanner,
    UpdateCategory, UpdateEvent,
};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: Category) -> CatalogResult<Category>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;
    async fn list(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>>;
    async fn count(&self, filter: CategoryFilter) -> CatalogResult<u64>;
    async fn update(&self, id: Uuid, update: UpdateCategory) -> CatalogResult<Category>;
    async fn delete(&self, id: Uuid) -> CatalogResult<Category>;
}

/// Repository trait for Event persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert(&self, event: Event) -> CatalogResult<Event>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Event>>;
    /// Fetch by the unique URL slug
    async fn get_by_slug(&self, slug: &str) -> CatalogResult<Option<Event>>;
    async fn list(&self, filter: EventFilter) -> CatalogResult<Vec<Event>>;
    async fn count(&self, filter: EventFilter) -> CatalogResult<u64>;
    async fn update(&self, id: Uuid, update: UpdateEvent) -> CatalogResult<Event>;
    async fn delete(&self, id: Uuid) -> CatalogResult<Event>;
}

/// Repository trait for Banner persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BannerRepository: Send + Sync {
    async fn insert(&self, banner: Banner) -> CatalogResult<Banner>;
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Banner>>;
    async fn list(&self, filter: BannerFilter) -> CatalogResult<Vec<Banner>>;
    async fn count(&self, filter: BannerFilter) -> CatalogResult<u64>;
    async fn update(&self, id: Uuid, update: UpdateBanner) -> CatalogResult<Banner>;
    async fn delete(&self, id: Uuid) -> CatalogResult<Banner>;
}
