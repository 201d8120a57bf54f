use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::domain::customer::errors::CustomerError;
use crate::domain::identity::errors::IdentityError;

pub mod assign_role;
pub mod create_customer;
pub mod customer_data;
pub mod deactivate_user;
pub mod delete_customer;
pub mod get_customer;
pub mod health;
pub mod identity_data;
pub mod list_areas;
pub mod list_customers;
pub mod list_users;
pub mod login;
pub mod profile;
pub mod register;
pub mod update_customer;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, payload: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(None, payload)))
    }

    pub fn with_message(status: StatusCode, message: impl Into<String>, payload: T) -> Self {
        ApiSuccess(
            status,
            Json(ApiResponseBody::new(Some(message.into()), payload)),
        )
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(ApiResponseBody::new_error(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// JSON body extractor whose rejections use the API envelope and status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the API envelope and status 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidUsername(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidFullName(_)
            | IdentityError::InvalidPassword(_)
            | IdentityError::InvalidRole(_)
            | IdentityError::DuplicateUsername(_)
            | IdentityError::DuplicateEmail(_) => ApiError::BadRequest(err.to_string()),
            IdentityError::InvalidCredentials | IdentityError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            IdentityError::Forbidden => ApiError::Forbidden(err.to_string()),
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::DatabaseError(_)
            | IdentityError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::InvalidField(_) => ApiError::BadRequest(err.to_string()),
            CustomerError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CustomerError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            CustomerError::DatabaseError(_) | CustomerError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Envelope shared by every `/api` response: `success`, an optional
/// `message`, and the payload's fields inlined next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: Option<String>, payload: T) -> Self {
        Self {
            success: true,
            message,
            payload,
        }
    }
}

impl ApiResponseBody<NoPayload> {
    pub fn new_error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            payload: NoPayload {},
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoPayload {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Data<T: Serialize + PartialEq> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T: Serialize + PartialEq> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize + PartialEq> From<Vec<T>> for Listing<T> {
    fn from(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Parse a numeric path segment, rejecting anything else with 400.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}

/// Distinguishes an absent JSON key (`None`) from an explicit `null`
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
