//! Mapping from service failures to JSON error responses.

use crate::assistant::{domain::AiServiceError, services::InsightsError};
use crate::context::{
    domain::ContextDomainError, ports::ContextRepositoryError, services::ContextJournalError,
};
use crate::task::{
    domain::TaskDomainError, ports::TaskRepositoryError, services::TaskLifecycleError,
};
use crate::user::{
    domain::UserDomainError, ports::UserRepositoryError, services::UserDirectoryError,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure surfaced to an HTTP caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("{message}")]
    Validation {
        /// Offending request field, when one can be named.
        field: Option<&'static str>,
        /// Human-readable description.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A natural key is already taken.
    #[error("{0}")]
    UniqueConstraintViolation(String),

    /// The completion service failed or replied with an invalid shape.
    #[error("{0}")]
    AiService(String),

    /// An assisted task creation failed; nothing was stored.
    #[error("{0}")]
    TaskCreationFailed(String),

    /// Any other persistence failure.
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    /// Builds a validation error naming the offending field.
    #[must_use]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    /// Builds the error for a missing required field.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::invalid(field, format!("missing required field '{field}'"))
    }

    /// Returns the stable error kind exposed to callers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::UniqueConstraintViolation(_) => "unique_constraint_violation",
            Self::AiService(_) => "ai_service_error",
            Self::TaskCreationFailed(_) => "task_creation_failed",
            Self::Store(_) => "store_error",
        }
    }

    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            Self::AiService(_) | Self::TaskCreationFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn store(detail: &impl std::fmt::Display) -> Self {
        error!(error = %detail, "store operation failed");
        Self::Store("internal storage error".to_owned())
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let field = match &self {
            Self::Validation { field, .. } => *field,
            _ => None,
        };
        let body = ErrorEnvelope {
            error: ErrorBody {
                kind: self.kind(),
                message: self.to_string(),
                field,
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            field: None,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation {
            field: None,
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid("id", rejection.body_text())
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        let field = match err {
            TaskDomainError::InvalidTaskId(_) => "id",
            TaskDomainError::EmptyTitle | TaskDomainError::TitleTooLong { .. } => "title",
            TaskDomainError::InvalidPriority(_) => "priority",
        };
        Self::invalid(field, err.to_string())
    }
}

impl From<UserDomainError> for ApiError {
    fn from(err: UserDomainError) -> Self {
        let field = match err {
            UserDomainError::InvalidUserId(_) => "userId",
            UserDomainError::InvalidEmail(_) | UserDomainError::EmailTooLong => "email",
            UserDomainError::EmptyName | UserDomainError::NameTooLong => "name",
        };
        Self::invalid(field, err.to_string())
    }
}

impl From<ContextDomainError> for ApiError {
    fn from(err: ContextDomainError) -> Self {
        let field = match err {
            ContextDomainError::InvalidEntryId(_) => "id",
            ContextDomainError::EmptyContent => "content",
            ContextDomainError::InvalidWindow(_) => "days",
        };
        Self::invalid(field, err.to_string())
    }
}

impl From<TaskRepositoryError> for ApiError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) | TaskRepositoryError::UnknownUser(_) => {
                Self::NotFound(err.to_string())
            }
            TaskRepositoryError::Persistence(_) => Self::store(&err),
        }
    }
}

impl From<ContextRepositoryError> for ApiError {
    fn from(err: ContextRepositoryError) -> Self {
        match err {
            ContextRepositoryError::UnknownUser(_) => Self::NotFound(err.to_string()),
            ContextRepositoryError::Persistence(_) => Self::store(&err),
        }
    }
}

impl From<UserRepositoryError> for ApiError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(_) => {
                Self::UniqueConstraintViolation(err.to_string())
            }
            UserRepositoryError::Persistence(_) => Self::store(&err),
        }
    }
}

impl From<AiServiceError> for ApiError {
    fn from(err: AiServiceError) -> Self {
        warn!(error = %err, "assistant unavailable");
        Self::AiService(err.to_string())
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(inner) => inner.into(),
            TaskLifecycleError::Repository(inner) => inner.into(),
            TaskLifecycleError::Context(inner) => inner.into(),
            TaskLifecycleError::TaskCreationFailed(_) => Self::TaskCreationFailed(err.to_string()),
        }
    }
}

impl From<ContextJournalError> for ApiError {
    fn from(err: ContextJournalError) -> Self {
        match err {
            ContextJournalError::Domain(inner) => inner.into(),
            ContextJournalError::Repository(inner) => inner.into(),
        }
    }
}

impl From<UserDirectoryError> for ApiError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Domain(inner) => inner.into(),
            UserDirectoryError::Repository(inner) => inner.into(),
        }
    }
}

impl From<InsightsError> for ApiError {
    fn from(err: InsightsError) -> Self {
        match err {
            InsightsError::Tasks(inner) => inner.into(),
            InsightsError::Context(inner) => inner.into(),
            InsightsError::Assistant(inner) => inner.into(),
        }
    }
}
