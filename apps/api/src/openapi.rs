//! OpenAPI documentation configuration

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Combined OpenAPI documentation for the whole API surface
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ticketing API",
        version = "0.1.0",
        description = "Event ticketing backend: auth, orders, tickets, and catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::ApiDoc),
        (path = "/api/orders", api = domain_orders::ApiDoc),
        (path = "/api/tickets", api = domain_tickets::ApiDoc),
        (path = "/api/categories", api = domain_catalog::CategoriesApiDoc),
        (path = "/api/events", api = domain_catalog::EventsApiDoc),
        (path = "/api/banners", api = domain_catalog::BannersApiDoc)
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Registration, login, and profile"),
        (name = "Orders", description = "Order lifecycle: create, complete, cancel"),
        (name = "Tickets", description = "Ticket classes and inventory"),
        (name = "Categories", description = "Event categories"),
        (name = "Events", description = "Event catalog"),
        (name = "Banners", description = "Landing page banners")
    )
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` security scheme referenced by guarded paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
