//! Catalog services - business logic for categories, events, and banners

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Banner, BannerFilter, Category, CategoryFilter, CreateBanner, CreateCategory, CreateEvent,
    Event, EventFilter, UpdateBanner, UpdateCategory, UpdateEvent,
};
use crate::repository::{BannerRepository, CategoryRepository, EventRepository};

fn validation_error(e: validator::ValidationErrors) -> CatalogError {
    CatalogError::Validation(e.to_string())
}

/// Category service
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate().map_err(validation_error)?;
        self.repository.insert(Category::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// List one page of categories and the total match count
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        let total = self.repository.count(filter.clone()).await?;
        let categories = self.repository.list(filter).await?;
        Ok((categories, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input.validate().map_err(validation_error)?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository.delete(id).await
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Event service
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an event owned by the caller. The slug falls back to a
    /// dashed lowercase form of the name.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_event(
        &self,
        input: CreateEvent,
        created_by: Uuid,
    ) -> CatalogResult<Event> {
        input.validate().map_err(validation_error)?;
        self.repository.insert(Event::new(input, created_by)).await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> CatalogResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::EventNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_event_by_slug(&self, slug: &str) -> CatalogResult<Event> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::EventSlugNotFound(slug.to_string()))
    }

    /// List one page of events and the total match count
    #[instrument(skip(self))]
    pub async fn list_events(&self, filter: EventFilter) -> CatalogResult<(Vec<Event>, u64)> {
        let total = self.repository.count(filter.clone()).await?;
        let events = self.repository.list(filter).await?;
        Ok((events, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> CatalogResult<Event> {
        input.validate().map_err(validation_error)?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> CatalogResult<Event> {
        self.repository.delete(id).await
    }
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Banner service
pub struct BannerService<R: BannerRepository> {
    repository: Arc<R>,
}

impl<R: BannerRepository> BannerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_banner(&self, input: CreateBanner) -> CatalogResult<Banner> {
        input.validate().map_err(validation_error)?;
        self.repository.insert(Banner::new(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_banner(&self, id: Uuid) -> CatalogResult<Banner> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::BannerNotFound(id))
    }

    /// List one page of banners and the total match count
    #[instrument(skip(self))]
    pub async fn list_banners(&self, filter: BannerFilter) -> CatalogResult<(Vec<Banner>, u64)> {
        let total = self.repository.count(filter.clone()).await?;
        let banners = self.repository.list(filter).await?;
        Ok((banners, total))
    }

    #[instrument(skip(self, input))]
    pub async fn update_banner(&self, id: Uuid, input: UpdateBanner) -> CatalogResult<Banner> {
        input.validate().map_err(validation_error)?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_banner(&self, id: Uuid) -> CatalogResult<Banner> {
        self.repository.delete(id).await
    }
}

impl<R: BannerRepository> Clone for BannerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::repository::{MockBannerRepository, MockCategoryRepository, MockEventRepository};
    use chrono::Utc;

    fn create_event_input() -> CreateEvent {
        CreateEvent {
            name: "Jazz Night".to_string(),
            slug: None,
            description: "An evening of jazz".to_string(),
            banner: "https://cdn.example.com/jazz.png".to_string(),
            category: Uuid::now_v7(),
            is_featured: true,
            is_online: false,
            is_publish: false,
            location: Location {
                region: 3173,
                coordinates: vec![106.8, -6.2],
                address: "Concert Hall".to_string(),
            },
            start_date: Utc::now(),
            end_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_event_derives_slug_and_sets_owner() {
        let owner = Uuid::now_v7();
        let mut repo = MockEventRepository::new();
        repo.expect_insert()
            .withf(move |event| event.slug == "jazz-night" && event.created_by == owner)
            .returning(|event| Ok(event));

        let service = EventService::new(repo);
        let event = service.create_event(create_event_input(), owner).await.unwrap();

        assert_eq!(event.slug, "jazz-night");
        assert!(!event.is_publish);
    }

    #[tokio::test]
    async fn create_event_rejects_blank_name_before_repository() {
        let mut repo = MockEventRepository::new();
        repo.expect_insert().never();

        let service = EventService::new(repo);
        let result = service
            .create_event(
                CreateEvent {
                    name: String::new(),
                    ..create_event_input()
                },
                Uuid::now_v7(),
            )
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn get_event_by_slug_maps_absence_to_not_found() {
        let mut repo = MockEventRepository::new();
        repo.expect_get_by_slug().returning(|_| Ok(None));

        let service = EventService::new(repo);
        let result = service.get_event_by_slug("missing-slug").await;

        assert!(matches!(result, Err(CatalogError::EventSlugNotFound(_))));
    }

    #[tokio::test]
    async fn list_categories_returns_page_and_total() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_count().returning(|_| Ok(25));
        repo.expect_list().returning(|_| {
            Ok(vec![Category::new(CreateCategory {
                name: "Music".to_string(),
                description: "Concerts".to_string(),
                icon: "music.svg".to_string(),
            })])
        });

        let service = CategoryService::new(repo);
        let (categories, total) = service
            .list_categories(CategoryFilter::default())
            .await
            .unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn get_missing_banner_is_not_found() {
        let mut repo = MockBannerRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = BannerService::new(repo);
        let result = service.get_banner(Uuid::now_v7()).await;

        assert!(matches!(result, Err(CatalogError::BannerNotFound(_))));
    }
}
