use axum::{
    Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use axum_helpers::{
    ApiResponse, Identity, JwtAuth, PageInfo, ValidatedJson, jwt_auth_middleware, require_admin,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Banner, BannerFilter, Category, CategoryFilter, CreateBanner, CreateCategory, CreateEvent,
    Event, EventFilter, Location, UpdateBanner, UpdateCategory, UpdateEvent,
};
use crate::repository::{BannerRepository, CategoryRepository, EventRepository};
use crate::service::{BannerService, CategoryService, EventService};

/// OpenAPI documentation for the categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(schemas(Category, CreateCategory, UpdateCategory)),
    tags(
        (name = "Categories", description = "Event category endpoints")
    )
)]
pub struct CategoriesApiDoc;

/// OpenAPI documentation for the events API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_events,
        create_event,
        get_event,
        get_event_by_slug,
        update_event,
        delete_event,
    ),
    components(schemas(Event, CreateEvent, UpdateEvent, Location)),
    tags(
        (name = "Events", description = "Event catalog endpoints")
    )
)]
pub struct EventsApiDoc;

/// OpenAPI documentation for the banners API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_banners,
        create_banner,
        get_banner,
        update_banner,
        delete_banner,
    ),
    components(schemas(Banner, CreateBanner, UpdateBanner)),
    tags(
        (name = "Banners", description = "Landing page banner endpoints")
    )
)]
pub struct BannersApiDoc;

/// Create the categories router. Reads are public; writes require an
/// admin bearer token.
pub fn categories_router<R: CategoryRepository + 'static>(
    service: CategoryService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/", axum::routing::post(create_category))
        .route(
            "/{id}",
            axum::routing::put(update_category).delete(delete_category),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service);

    public.merge(admin)
}

/// Create the events router. Reads are public; writes require an admin
/// bearer token.
pub fn events_router<R: EventRepository + 'static>(
    service: EventService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_events))
        .route("/{id}", get(get_event))
        .route("/slug/{slug}", get(get_event_by_slug))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/", axum::routing::post(create_event))
        .route(
            "/{id}",
            axum::routing::put(update_event).delete(delete_event),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service);

    public.merge(admin)
}

/// Create the banners router. Reads are public; writes require an admin
/// bearer token.
pub fn banners_router<R: BannerRepository + 'static>(
    service: BannerService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_banners))
        .route("/{id}", get(get_banner))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/", axum::routing::post(create_banner))
        .route(
            "/{id}",
            axum::routing::put(update_banner).delete(delete_banner),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service);

    public.merge(admin)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// List categories with pagination and optional search
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    params(CategoryFilter),
    responses((status = 200, description = "Paginated category list"))
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Query(filter): Query<CategoryFilter>,
) -> CatalogResult<ApiResponse<Vec<Category>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (categories, total) = service.list_categories(filter).await?;

    Ok(ApiResponse::paginated(
        categories,
        PageInfo::new(total, limit, page),
        "Success get all category",
    ))
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category created"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Unauthorized")
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<ApiResponse<Category>> {
    let category = service.create_category(input).await?;
    Ok(ApiResponse::ok(category, "Success create category"))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found"),
        (status = 404, description = "Category not found")
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Category>> {
    let category = service.get_category(id).await?;
    Ok(ApiResponse::ok(category, "Success get one category"))
}

/// Update a category (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category updated"),
        (status = 404, description = "Category not found")
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<ApiResponse<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(ApiResponse::ok(category, "Success update category"))
}

/// Delete a category (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category removed"),
        (status = 404, description = "Category not found")
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Category>> {
    let category = service.delete_category(id).await?;
    Ok(ApiResponse::ok(category, "Success remove category"))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// List events with pagination, search, and catalog flags
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    params(EventFilter),
    responses((status = 200, description = "Paginated event list"))
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Query(filter): Query<EventFilter>,
) -> CatalogResult<ApiResponse<Vec<Event>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (events, total) = service.list_events(filter).await?;

    Ok(ApiResponse::paginated(
        events,
        PageInfo::new(total, limit, page),
        "Success to find all event",
    ))
}

/// Create an event (admin only); the caller becomes the owner
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Event created"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Unauthorized")
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    identity: Identity,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> CatalogResult<ApiResponse<Event>> {
    let event = service.create_event(input, identity.user_id).await?;
    Ok(ApiResponse::ok(event, "Success to create an event"))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found"),
        (status = 404, description = "Event not found")
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Event>> {
    let event = service.get_event(id).await?;
    Ok(ApiResponse::ok(event, "Success to find one event"))
}

/// Get an event by its URL slug
#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Events",
    params(("slug" = String, Path, description = "Event slug")),
    responses(
        (status = 200, description = "Event found"),
        (status = 404, description = "Event not found")
    )
)]
async fn get_event_by_slug<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(slug): Path<String>,
) -> CatalogResult<ApiResponse<Event>> {
    let event = service.get_event_by_slug(&slug).await?;
    Ok(ApiResponse::ok(event, "Success to find an event by slug"))
}

/// Update an event (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEvent,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Event updated"),
        (status = 404, description = "Event not found")
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> CatalogResult<ApiResponse<Event>> {
    let event = service.update_event(id, input).await?;
    Ok(ApiResponse::ok(event, "Success to update event"))
}

/// Delete an event (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(("id" = Uuid, Path, description = "Event ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Event removed"),
        (status = 404, description = "Event not found")
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Event>> {
    let event = service.delete_event(id).await?;
    Ok(ApiResponse::ok(event, "Success to remove an event"))
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

/// List banners with pagination and optional search
#[utoipa::path(
    get,
    path = "",
    tag = "Banners",
    params(BannerFilter),
    responses((status = 200, description = "Paginated banner list"))
)]
async fn list_banners<R: BannerRepository>(
    State(service): State<Arc<BannerService<R>>>,
    Query(filter): Query<BannerFilter>,
) -> CatalogResult<ApiResponse<Vec<Banner>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (banners, total) = service.list_banners(filter).await?;

    Ok(ApiResponse::paginated(
        banners,
        PageInfo::new(total, limit, page),
        "Success to find all banner",
    ))
}

/// Create a banner (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Banners",
    request_body = CreateBanner,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Banner created"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Unauthorized")
    )
)]
async fn create_banner<R: BannerRepository>(
    State(service): State<Arc<BannerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateBanner>,
) -> CatalogResult<ApiResponse<Banner>> {
    let banner = service.create_banner(input).await?;
    Ok(ApiResponse::ok(banner, "Success to create banner"))
}

/// Get a banner by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Banners",
    params(("id" = Uuid, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Banner found"),
        (status = 404, description = "Banner not found")
    )
)]
async fn get_banner<R: BannerRepository>(
    State(service): State<Arc<BannerService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Banner>> {
    let banner = service.get_banner(id).await?;
    Ok(ApiResponse::ok(banner, "Success to find one banner"))
}

/// Update a banner (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Banners",
    params(("id" = Uuid, Path, description = "Banner ID")),
    request_body = UpdateBanner,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Banner updated"),
        (status = 404, description = "Banner not found")
    )
)]
async fn update_banner<R: BannerRepository>(
    State(service): State<Arc<BannerService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateBanner>,
) -> CatalogResult<ApiResponse<Banner>> {
    let banner = service.update_banner(id, input).await?;
    Ok(ApiResponse::ok(banner, "Success to update banner"))
}

/// Delete a banner (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Banners",
    params(("id" = Uuid, Path, description = "Banner ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Banner removed"),
        (status = 404, description = "Banner not found")
    )
)]
async fn delete_banner<R: BannerRepository>(
    State(service): State<Arc<BannerService<R>>>,
    Path(id): Path<Uuid>,
) -> CatalogResult<ApiResponse<Banner>> {
    let banner = service.delete_banner(id).await?;
    Ok(ApiResponse::ok(banner, "Success to remove banner"))
}
