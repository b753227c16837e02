//! JSON response envelope shared by every API handler.

use salvo::Response;
use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `{ success, message, data }` where `success` is `status < 400`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

/// ## Summary
/// Renders an envelope with the given status.
pub fn send_response<T>(res: &mut Response, status: StatusCode, message: &str, data: Option<T>)
where
    T: Serialize + Send,
{
    res.status_code(status);
    res.render(Json(Envelope {
        success: status.as_u16() < 400,
        message: message.to_string(),
        data,
    }));
}

/// ## Summary
/// Renders an error envelope with `data: null`.
///
/// Server-side failures are logged and reported with `failure` so internal
/// details stay out of the response.
pub fn send_error(res: &mut Response, err: &AppError, failure: &str) {
    let status = err.status_code();
    let message = match status {
        StatusCode::NOT_FOUND => "Event not found".to_string(),
        status if status.is_client_error() => err.client_message(),
        _ => {
            tracing::error!(error = %err, "{failure}");
            failure.to_string()
        }
    };
    if status.is_client_error() {
        tracing::debug!(status = status.as_u16(), error = %err, "Rejected request");
    }
    send_response::<()>(res, status, &message, None);
}
