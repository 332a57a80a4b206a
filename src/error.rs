use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::{debug, error};

use crate::gateway::GatewayError;
use crate::table::TableError;
use crate::utils::validation::ValidationErrors;

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{}", _0)]
    Table(TableError),

    #[display(fmt = "{}", _0)]
    Gateway(GatewayError),

    #[display(fmt = "validation failed")]
    Invalid(ValidationErrors),

    /// Body or query string that failed to deserialize.
    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),
}

impl From<TableError> for ApiError {
    fn from(e: TableError) -> Self {
        ApiError::Table(e)
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        ApiError::Gateway(e)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Invalid(e)
    }
}

/// Routes extractor failures through [`ApiError`] so they get a JSON body too.
pub fn extractor_error(err: impl std::fmt::Display) -> actix_web::Error {
    debug!(error = %err, "Rejected request payload");
    ApiError::BadRequest(err.to_string()).into()
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Table(_) | ApiError::Invalid(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Gateway(GatewayError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Gateway(GatewayError::NotFound(_)) | ApiError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Gateway(GatewayError::Conflict(_)) | ApiError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            ApiError::Gateway(GatewayError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Invalid(errors) => json!({
                "detail": "Validation failed",
                "errors": errors,
            }),
            ApiError::Gateway(GatewayError::Backend(e)) => {
                error!(error = %e, "Request failed in backend");
                json!({ "detail": "Something went wrong, Contact with system admin" })
            }
            other => json!({ "detail": other.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
