//! Catalog Domain
//!
//! Everything the storefront browses: event categories, the events
//! themselves (with slugs for pretty URLs), and landing page banners.
//! Reads are public; every write is admin-gated.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use handlers::{BannersApiDoc, CategoriesApiDoc, EventsApiDoc};
pub use models::{
    Banner, BannerFilter, Category, CategoryFilter, CreateBanner, CreateCategory, CreateEvent,
    Event, EventFilter, Location, UpdateBanner, UpdateCategory, UpdateEvent,
};
pub use mongodb::{
    BANNERS_COLLECTION, CATEGORIES_COLLECTION, EVENTS_COLLECTION, MongoBannerRepository,
    MongoCategoryRepository, MongoEventRepository,
};
pub use repository::{BannerRepository, CategoryRepository, EventRepository};
pub use service::{BannerService, CategoryService, EventService};
