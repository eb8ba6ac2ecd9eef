use axum::{
    Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};
use axum_helpers::{
    ApiResponse, JwtAuth, PageInfo, ValidatedJson, jwt_auth_middleware, require_admin,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::TicketResult;
use crate::models::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use crate::repository::TicketRepository;
use crate::service::TicketService;

/// OpenAPI documentation for the Tickets API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tickets,
        create_ticket,
        get_ticket,
        update_ticket,
        delete_ticket,
        tickets_by_event,
    ),
    components(schemas(Ticket, CreateTicket, UpdateTicket, TicketFilter)),
    tags(
        (name = "Tickets", description = "Ticket catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the tickets router.
///
/// Reads are public; mutations require an admin bearer token.
pub fn router<R: TicketRepository + 'static>(
    service: TicketService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_tickets))
        .route("/{id}", get(get_ticket))
        .route("/{event}/events", get(tickets_by_event))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/", axum::routing::post(create_ticket))
        .route(
            "/{id}",
            axum::routing::put(update_ticket).delete(delete_ticket),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service);

    public.merge(admin)
}

/// List tickets with pagination and optional text search
#[utoipa::path(
    get,
    path = "",
    tag = "Tickets",
    params(TicketFilter),
    responses(
        (status = 200, description = "Paginated ticket list"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_tickets<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    Query(filter): Query<TicketFilter>,
) -> TicketResult<ApiResponse<Vec<Ticket>>> {
    let page = filter.current();
    let limit = filter.page_size() as u64;
    let (tickets, total) = service.list_tickets(filter).await?;

    Ok(ApiResponse::paginated(
        tickets,
        PageInfo::new(total, limit, page),
        "Success to get all tickets",
    ))
}

/// Create a new ticket class (admin only)
#[utoipa::path(
    post,
    path = "",
    tag = "Tickets",
    request_body = CreateTicket,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Ticket created"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Unauthorized")
    )
)]
async fn create_ticket<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTicket>,
) -> TicketResult<ApiResponse<Ticket>> {
    let ticket = service.create_ticket(input).await?;
    Ok(ApiResponse::ok(ticket, "Success to create a ticket"))
}

/// Get a ticket by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket found"),
        (status = 404, description = "Ticket not found")
    )
)]
async fn get_ticket<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    Path(id): Path<Uuid>,
) -> TicketResult<ApiResponse<Ticket>> {
    let ticket = service.get_ticket(id).await?;
    Ok(ApiResponse::ok(ticket, "Success to get one ticket"))
}

/// Update a ticket (admin only)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateTicket,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Ticket updated"),
        (status = 404, description = "Ticket not found")
    )
)]
async fn update_ticket<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateTicket>,
) -> TicketResult<ApiResponse<Ticket>> {
    let ticket = service.update_ticket(id, input).await?;
    Ok(ApiResponse::ok(ticket, "Success to update ticket"))
}

/// Delete a ticket (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Ticket removed"),
        (status = 404, description = "Ticket not found")
    )
)]
async fn delete_ticket<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    Path(id): Path<Uuid>,
) -> TicketResult<ApiResponse<Ticket>> {
    let ticket = service.delete_ticket(id).await?;
    Ok(ApiResponse::ok(ticket, "Success to remove ticket"))
}

/// List ticket classes for an event
#[utoipa::path(
    get,
    path = "/{event}/events",
    tag = "Tickets",
    params(("event" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Tickets for the event")
    )
)]
async fn tickets_by_event<R: TicketRepository>(
    State(service): State<Arc<TicketService<R>>>,
    Path(event): Path<Uuid>,
) -> TicketResult<ApiResponse<Vec<Ticket>>> {
    let tickets = service.tickets_by_event(event).await?;
    Ok(ApiResponse::ok(tickets, "Success to get one ticket"))
}
