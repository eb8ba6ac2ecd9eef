use axum::{
    Router,
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, put},
};
use axum_helpers::{
    ApiResponse, Identity, JwtAuth, PageInfo, ValidatedJson, jwt_auth_middleware, require_admin,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderFilter, OrderStatus, Voucher};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_order,
        list_orders,
        list_my_orders,
        get_order,
        complete_order,
        pending_order,
        cancel_order,
        remove_order,
    ),
    components(schemas(Order, CreateOrder, OrderFilter, OrderStatus, Voucher)),
    tags(
        (name = "Orders", description = "Order lifecycle endpoints")
    )
)]
pub struct ApiDoc;

/// Create the orders router. Every route requires a bearer token;
/// removal additionally requires the admin role.
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    let member = Router::new()
        .route("/", axum::routing::post(create_order).get(list_orders))
        .route("/me", get(list_my_orders))
        .route("/{order_id}", get(get_order))
        .route("/{order_id}/complete", put(complete_order))
        .route("/{order_id}/pending", put(pending_order))
        .route("/{order_id}/cancelled", put(cancel_order))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/{order_id}", delete(remove_order))
        .route_layer(middleware::from_fn(require_admin))
        .with_state(shared_service);

    member
        .merge(admin)
        .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
}

/// Place an order for a ticket class
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order created, status pending"),
        (status = 400, description = "Validation failed or quantity not available"),
        (status = 404, description = "Ticket not found")
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    identity: Identity,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.create_order(identity.user_id, input).await?;
    Ok(ApiResponse::ok(order, "Success to create an order"))
}

/// List all orders (paginated)
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    params(OrderFilter),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Paginated order list")
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    _identity: Identity,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<ApiResponse<Vec<Order>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (orders, total) = service.list_orders(filter, None).await?;

    Ok(ApiResponse::paginated(
        orders,
        PageInfo::new(total, limit, page),
        "Success to find all orders",
    ))
}

/// List the caller's own orders (paginated)
#[utoipa::path(
    get,
    path = "/me",
    tag = "Orders",
    params(OrderFilter),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Paginated order list for the caller")
    )
)]
async fn list_my_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    identity: Identity,
    Query(filter): Query<OrderFilter>,
) -> OrderResult<ApiResponse<Vec<Order>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (orders, total) = service.list_orders(filter, Some(identity.user_id)).await?;

    Ok(ApiResponse::paginated(
        orders,
        PageInfo::new(total, limit, page),
        "Success to find all orders",
    ))
}

/// Fetch one order by its external token
#[utoipa::path(
    get,
    path = "/{order_id}",
    tag = "Orders",
    params(("order_id" = String, Path, description = "External order token")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order found"),
        (status = 404, description = "Order not found")
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    _identity: Identity,
    Path(order_id): Path<String>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.get_order(&order_id).await?;
    Ok(ApiResponse::ok(order, "Success to find one order"))
}

/// Complete an order, minting vouchers and decrementing inventory
#[utoipa::path(
    put,
    path = "/{order_id}/complete",
    tag = "Orders",
    params(("order_id" = String, Path, description = "External order token")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order completed"),
        (status = 400, description = "Already completed or quantity not available"),
        (status = 404, description = "Order not found")
    )
)]
async fn complete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    identity: Identity,
    Path(order_id): Path<String>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.complete_order(&order_id, identity.user_id).await?;
    Ok(ApiResponse::ok(order, "Success to complete an order"))
}

/// Mark an order pending
#[utoipa::path(
    put,
    path = "/{order_id}/pending",
    tag = "Orders",
    params(("order_id" = String, Path, description = "External order token")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order marked pending"),
        (status = 400, description = "Already pending or already completed"),
        (status = 404, description = "Order not found")
    )
)]
async fn pending_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    _identity: Identity,
    Path(order_id): Path<String>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.mark_pending(&order_id).await?;
    Ok(ApiResponse::ok(order, "Success to pending an order"))
}

/// Cancel an order
#[utoipa::path(
    put,
    path = "/{order_id}/cancelled",
    tag = "Orders",
    params(("order_id" = String, Path, description = "External order token")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order cancelled"),
        (status = 400, description = "Already cancelled or already completed"),
        (status = 404, description = "Order not found")
    )
)]
async fn cancel_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    _identity: Identity,
    Path(order_id): Path<String>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.cancel_order(&order_id).await?;
    Ok(ApiResponse::ok(order, "Success to cancel an order"))
}

/// Remove an order (admin only)
#[utoipa::path(
    delete,
    path = "/{order_id}",
    tag = "Orders",
    params(("order_id" = String, Path, description = "External order token")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order removed"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found")
    )
)]
async fn remove_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Path(order_id): Path<String>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.remove_order(&order_id).await?;
    Ok(ApiResponse::ok(order, "Success to remove an order"))
}
