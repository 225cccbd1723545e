// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Webcal API.
// It is served by the API server (Swagger UI) and printed by the
// export-openapi binary.

use crate::api;
use webcal_core::Event;
use utoipa::OpenApi;

/// OpenAPI documentation for the Webcal API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::create_event,
        api::events::list_events,
        api::events::list_today_events,
        api::events::get_event,
        api::events::delete_event,
    ),
    components(
        schemas(
            Event,
            api::events::CreateEventRequest,
            api::events::CreatedEventResponse,
            api::events::ListEventsQuery,
            api::common::ErrorResponse,
            api::common::ErrorMessage,
            api::common::MessageResponse,
        )
    ),
    tags(
        (name = "events", description = "Calendar event endpoints")
    ),
    info(
        title = "Webcal API",
        version = "0.1.0",
        description = "API for creating, listing, and deleting dated calendar events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}
