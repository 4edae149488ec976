use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::dtos::{RootDto, RootLinks};
use common::util::routes::{CONVERT_ROUTE, HEALTH_ROUTE, ROOT_ROUTE};

use crate::consts::{NAME, VERSION};

pub fn create_route() -> Router {
    Router::new().route(ROOT_ROUTE, get(root_links)).route(HEALTH_ROUTE, get(health))
}

pub async fn root_links() -> Json<RootDto<'static>> {
    Json(RootDto {
        version: VERSION,
        name: NAME,
        _links: RootLinks {
            convert: CONVERT_ROUTE,
            health: HEALTH_ROUTE,
        },
    })
}

#[tracing::instrument]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
