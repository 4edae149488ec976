use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use common::{dtos::ConversionRequest, util::{random::generate_30_alphanumeric, routes::CONVERT_ROUTE}};
use tracing::{error, info};

use crate::state::Services;

pub fn create_route(services: Services) -> Router {
    Router::new().route(CONVERT_ROUTE, post(convert)).with_state(services)
}

/// Renders the posted document. Failures are logged and answered with a bare
/// status and an empty body: 400 for an unreadable request, 500 for a failed
/// render. The cause never reaches the caller.
#[tracing::instrument(skip_all, fields(request_id = %generate_30_alphanumeric()))]
pub async fn convert(State(services): State<Services>, request: Result<Json<ConversionRequest>, JsonRejection>) -> Response {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!("Rejected conversion request: {}", rejection);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    info!("Starting conversion of {} bytes of html", request.pdf_body.len());
    match services.renderer.render(&request).await {
        Ok(pdf) => ([(header::CONTENT_TYPE, mime::APPLICATION_PDF.to_string())], pdf).into_response(),
        Err(err) => {
            error!("Conversion failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
