//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the registration resource, the health probes, and the
//! response envelopes. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::envelope::{ErrorResponse, FieldErrorsResponse, SuccessResponse};
use crate::inbound::http::registration::RegistrationForm;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration API",
        description = "Account registration with field validation and uniqueness checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registration::register,
        crate::inbound::http::registration::input_click,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegistrationForm,
        SuccessResponse,
        FieldErrorsResponse,
        ErrorResponse
    )),
    tags(
        (name = "registration", description = "Account registration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
