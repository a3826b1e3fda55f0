//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Hub API",
        version = "0.1.0",
        description = "User accounts, favorite events, and event search over the Ticketmaster Discovery API",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc),
        (path = "/api/auth", api = domain_users::AuthApiDoc),
        (path = "/api/users", api = domain_users::UsersApiDoc)
    ),
    tags(
        (name = "events", description = "Event search over the upstream listing API"),
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Per-user favorite events")
    )
)]
pub struct ApiDoc;
