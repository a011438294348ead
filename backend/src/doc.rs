//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST API: every endpoint
//! from the inbound layer plus the shared error schema. The document backs
//! Swagger UI in debug builds.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Matatu registry API",
        description = "HTTP interface for matatu, fleet, fare, and payment records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::token,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::fleets::create_fleet,
        crate::inbound::http::fleets::list_fleets,
        crate::inbound::http::fleets::get_fleet,
        crate::inbound::http::fleets::list_fleets_for_operator,
        crate::inbound::http::fleets::delete_fleet,
        crate::inbound::http::matatus::create_matatu,
        crate::inbound::http::matatus::list_matatus,
        crate::inbound::http::matatus::get_matatu,
        crate::inbound::http::matatus::get_matatu_by_registration,
        crate::inbound::http::matatus::list_matatus_for_operator,
        crate::inbound::http::matatus::delete_matatu,
        crate::inbound::http::fares::create_fare,
        crate::inbound::http::fares::list_fares,
        crate::inbound::http::fares::list_fares_for_matatu,
        crate::inbound::http::fares::update_fare,
        crate::inbound::http::payments::create_payment,
        crate::inbound::http::payments::list_payments,
        crate::inbound::http::payments::list_payments_for_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::DomainError,
        crate::domain::ErrorCode,
        crate::inbound::http::auth::TokenForm,
        crate::inbound::http::auth::TokenResponse,
        crate::inbound::http::users::UserCreate,
        crate::inbound::http::users::UserOut,
        crate::inbound::http::fleets::FleetCreate,
        crate::inbound::http::fleets::FleetOut,
        crate::inbound::http::matatus::MatatuCreate,
        crate::inbound::http::matatus::MatatuOut,
        crate::inbound::http::fares::FareUpsert,
        crate::inbound::http::fares::FareOut,
        crate::inbound::http::payments::PaymentCreate,
        crate::inbound::http::payments::PaymentOut,
    )),
    tags(
        (name = "auth", description = "Credential exchange"),
        (name = "users", description = "Rider and operator accounts"),
        (name = "fleets", description = "Fleet groupings"),
        (name = "matatus", description = "Registered vehicles"),
        (name = "fares", description = "Fare schedules"),
        (name = "payments", description = "Recorded payment events"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
