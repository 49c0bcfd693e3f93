use std::any::Any;

use axum::{
    Router,
    response::{IntoResponse, Response},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{ApiDoc, error::WebError, features, state::AppState};

/// Build the full application: `/api` routes, Swagger UI and the shared
/// middleware stack.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/categories", features::categories::routes())
        .nest("/products", features::products::routes());

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .map_response(IntoResponse::into_response)
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

async fn route_not_found() -> WebError {
    WebError::NotFound("Route not found".to_string())
}

/// Last-resort handler: a panicking request still gets the generic envelope.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    WebError::internal("Internal server error", format!("handler panicked: {}", detail))
        .into_response()
}
