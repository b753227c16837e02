use salvo::{Response, Router, handler, http::StatusCode};
use serde::Serialize;

use kairos_core::constants::HEALTHCHECK_NAME;

use super::response::send_response;

#[derive(Debug, Serialize)]
struct HealthStatus {
    name: &'static str,
    message: &'static str,
}

#[handler]
async fn healthcheck(res: &mut Response) {
    send_response(
        res,
        StatusCode::OK,
        "Data fetched successfully!",
        Some(HealthStatus {
            name: HEALTHCHECK_NAME,
            message: "Api is running",
        }),
    );
}

#[must_use]
pub fn routes() -> Router {
    Router::new().get(healthcheck)
}
