use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use pawpaw_engine::traits::{ProfileApiError, SocialGatewayError, WalletApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Forbidden. {0}")]
    Forbidden(String),
    #[error("Invalid operation. {0}")]
    InvalidOperation(String),
    #[error("Insufficient funds. {0}")]
    InsufficientFunds(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No bearer token was provided.")]
    MissingToken,
    #[error("Access token is invalid. {0}")]
    ValidationError(String),
}

/// Expected domain outcomes map onto 4xx codes; unexpected storage failures are logged by the
/// engine and surface as 500s that are safe to retry.
impl From<SocialGatewayError> for ServerError {
    fn from(e: SocialGatewayError) -> Self {
        match e {
            SocialGatewayError::ProfileNotFound(_) => Self::NoRecordFound(e.to_string()),
            SocialGatewayError::SelfSwipe => Self::InvalidOperation(e.to_string()),
            SocialGatewayError::AlreadySwiped { .. } => Self::InvalidOperation(e.to_string()),
            SocialGatewayError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<ProfileApiError> for ServerError {
    fn from(e: ProfileApiError) -> Self {
        match e {
            ProfileApiError::ProfileNotFound(_) => Self::NoRecordFound(e.to_string()),
            ProfileApiError::ProfileAlreadyExists(_) => Self::InvalidOperation(e.to_string()),
            ProfileApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<WalletApiError> for ServerError {
    fn from(e: WalletApiError) -> Self {
        match e {
            WalletApiError::InsufficientFunds { .. } => Self::InsufficientFunds(e.to_string()),
            WalletApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
