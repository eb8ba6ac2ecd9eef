use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Category entity - groups events by theme
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Icon asset URL
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Query parameters for listing categories
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl CategoryFilter {
    /// 1-based page, floored at 1.
    pub fn current(&self) -> u64 {
        self.page.max(1)
    }

    /// Effective page size; out-of-range limits fall back to the default.
    pub fn page_size(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            default_limit()
        }
    }

    pub fn skip(&self) -> u64 {
        (self.current() - 1) * self.page_size() as u64
    }
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            icon: input.icon,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Where an event takes place
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Location {
    /// Administrative region code
    pub region: i64,
    /// [longitude, latitude]
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub address: String,
}

/// Event entity - a happening people buy tickets for
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    /// URL-safe identifier, unique, derived from the name when absent
    pub slug: String,
    pub description: String,
    /// Banner image URL
    pub banner: String,
    pub category: Uuid,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(rename = "isOnline")]
    pub is_online: bool,
    #[serde(rename = "isPublish")]
    pub is_publish: bool,
    pub location: Location,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "createdBy")]
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Optional; derived from the name when omitted
    pub slug: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub banner: String,
    pub category: Uuid,
    #[serde(rename = "isFeatured")]
    pub is_featured: bool,
    #[serde(rename = "isOnline")]
    pub is_online: bool,
    /// Defaults to false: events are drafts until published
    #[serde(default, rename = "isPublish")]
    pub is_publish: bool,
    pub location: Location,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub category: Option<Uuid>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    #[serde(rename = "isOnline")]
    pub is_online: Option<bool>,
    #[serde(rename = "isPublish")]
    pub is_publish: Option<bool>,
    pub location: Option<Location>,
    #[serde(rename = "startDate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Query parameters for listing events
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    /// Full-text search against name and description
    pub search: Option<String>,
    pub category: Option<Uuid>,
    #[serde(rename = "isOnline")]
    pub is_online: Option<bool>,
    #[serde(rename = "isFeatured")]
    pub is_featured: Option<bool>,
    #[serde(rename = "isPublish")]
    pub is_publish: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            is_online: None,
            is_featured: None,
            is_publish: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl EventFilter {
    /// 1-based page, floored at 1.
    pub fn current(&self) -> u64 {
        self.page.max(1)
    }

    /// Effective page size; out-of-range limits fall back to the default.
    pub fn page_size(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            default_limit()
        }
    }

    pub fn skip(&self) -> u64 {
        (self.current() - 1) * self.page_size() as u64
    }
}

/// Lowercase the name and join words with dashes.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

impl Event {
    /// Create a new event owned by `created_by`, deriving the slug from
    /// the name when the input leaves it out.
    pub fn new(input: CreateEvent, created_by: Uuid) -> Self {
        let now = Utc::now();
        let slug = input
            .slug
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&input.name));
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            slug,
            description: input.description,
            banner: input.banner,
            category: input.category,
            is_featured: input.is_featured,
            is_online: input.is_online,
            is_publish: input.is_publish,
            location: input.location,
            start_date: input.start_date,
            end_date: input.end_date,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateEvent) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(banner) = update.banner {
            self.banner = banner;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(is_online) = update.is_online {
            self.is_online = is_online;
        }
        if let Some(is_publish) = update.is_publish {
            self.is_publish = is_publish;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

/// Banner entity - a promotional image on the landing page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Banner {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    /// Image asset URL
    pub image: String,
    #[serde(rename = "isShow")]
    pub is_show: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBanner {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub image: String,
    /// Banners are visible unless told otherwise
    #[serde(default = "default_is_show", rename = "isShow")]
    pub is_show: bool,
}

fn default_is_show() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBanner {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "isShow")]
    pub is_show: Option<bool>,
}

/// Query parameters for listing banners
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct BannerFilter {
    /// Full-text search against the title
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for BannerFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl BannerFilter {
    /// 1-based page, floored at 1.
    pub fn current(&self) -> u64 {
        self.page.max(1)
    }

    /// Effective page size; out-of-range limits fall back to the default.
    pub fn page_size(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            default_limit()
        }
    }

    pub fn skip(&self) -> u64 {
        (self.current() - 1) * self.page_size() as u64
    }
}

impl Banner {
    pub fn new(input: CreateBanner) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            image: input.image,
            is_show: input.is_show,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateBanner) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(is_show) = update.is_show {
            self.is_show = is_show;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_event_input() -> CreateEvent {
        CreateEvent {
            name: "Rust Meetup Jakarta".to_string(),
            slug: None,
            description: "Monthly meetup".to_string(),
            banner: "https://cdn.example.com/banner.png".to_string(),
            category: Uuid::now_v7(),
            is_featured: false,
            is_online: false,
            is_publish: false,
            location: Location {
                region: 3173,
                coordinates: vec![106.8, -6.2],
                address: "Jl. Sudirman 1".to_string(),
            },
            start_date: Utc::now(),
            end_date: Utc::now(),
        }
    }

    #[test]
    fn slug_is_derived_from_name_when_absent() {
        let event = Event::new(create_event_input(), Uuid::now_v7());
        assert_eq!(event.slug, "rust-meetup-jakarta");
    }

    #[test]
    fn explicit_slug_is_kept() {
        let input = CreateEvent {
            slug: Some("rustjkt-2026".to_string()),
            ..create_event_input()
        };
        let event = Event::new(input, Uuid::now_v7());
        assert_eq!(event.slug, "rustjkt-2026");
    }

    #[test]
    fn empty_slug_falls_back_to_derivation() {
        let input = CreateEvent {
            slug: Some(String::new()),
            ..create_event_input()
        };
        let event = Event::new(input, Uuid::now_v7());
        assert_eq!(event.slug, "rust-meetup-jakarta");
    }

    #[test]
    fn new_event_is_draft_by_default() {
        let event = Event::new(create_event_input(), Uuid::now_v7());
        assert!(!event.is_publish);
    }

    #[test]
    fn event_serializes_with_camel_case_flags() {
        let event = Event::new(create_event_input(), Uuid::now_v7());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("isPublish").is_some());
        assert!(json.get("isFeatured").is_some());
        assert!(json.get("startDate").is_some());
        assert!(json.get("is_publish").is_none());
    }

    #[test]
    fn banner_defaults_to_visible() {
        let json = serde_json::json!({
            "title": "Grand opening",
            "image": "https://cdn.example.com/open.png"
        });
        let input: CreateBanner = serde_json::from_value(json).unwrap();
        let banner = Banner::new(input);
        assert!(banner.is_show);
    }

    #[test]
    fn category_update_touches_only_provided_fields() {
        let mut category = Category::new(CreateCategory {
            name: "Music".to_string(),
            description: "Concerts and gigs".to_string(),
            icon: "music.svg".to_string(),
        });
        let before = category.clone();

        category.apply_update(UpdateCategory {
            icon: Some("note.svg".to_string()),
            ..Default::default()
        });

        assert_eq!(category.icon, "note.svg");
        assert_eq!(category.name, before.name);
        assert_eq!(category.description, before.description);
    }

    #[test]
    fn filter_skip_advances_with_page() {
        let filter = EventFilter {
            page: 3,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(filter.skip(), 20);
    }

    #[test]
    fn filter_clamps_out_of_range_pagination() {
        let filter = EventFilter {
            page: 0,
            limit: 0,
            ..Default::default()
        };
        assert_eq!(filter.current(), 1);
        assert_eq!(filter.page_size(), 10);
        assert_eq!(filter.skip(), 0);
    }
}
