//! # Errors
//!
//! Every fallible operation in this crate returns [`CriteriaError`]. The variants fall in
//! three groups:
//!
//! - **Configuration errors** (`BlankAlias`, `BlankMethodName`, `DuplicateSortAlias`,
//!   `ConflictingDefaultOrdering`, `NoSortTargets`) are raised at build time or on the first
//!   extraction of a criteria type. They indicate a programming mistake and are never retried.
//! - **Request errors** (`SortPropertyNotFound`, `SortAliasNotFound`, `InvalidSortParameter`)
//!   come from caller-supplied sort input. Lookup misses can be downgraded to "skip and log"
//!   through the [`SortConfig`](crate::sort::SortConfig) flags.
//! - **Misuse errors** (`MultiValuedParameter`) are contract violations by the calling code.
//!
//! When used from an axum handler the error converts into a response: request errors become
//! `400 Bad Request` with their message, everything else is logged and returned as a
//! sanitized `500`.
//!
//! ```rust,ignore
//! async fn list(Query(params): Query<SortParams>) -> Result<Json<Vec<Item>>, CriteriaError> {
//!     let request = SortRequest::try_from(&params)?;
//!     let ordering = ITEM_SORT.resolve(&request, None)?;
//!     // ...
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised while extracting criteria metadata, translating filters or resolving sorts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    /// An alias was blank once its operator selector was dropped and it was trimmed.
    #[error("alias of member '{member}' on {owner} is blank")]
    BlankAlias { owner: &'static str, member: String },

    /// A method name was nothing but a `get`/`is` prefix.
    #[error("method '{method}' on {owner} has no name left once its get/is prefix is removed")]
    BlankMethodName { owner: &'static str, method: String },

    /// The same alias was registered twice in a sort configuration.
    #[error("sort alias '{0}' is already registered")]
    DuplicateSortAlias(String),

    /// Both a default sort request and literal default columns were configured.
    #[error("a default sort request and default sort columns cannot both be configured")]
    ConflictingDefaultOrdering,

    /// Resolution was attempted with no alias table and no ad-hoc column list.
    #[error("no sort aliases are configured and no sortable columns were supplied")]
    NoSortTargets,

    /// A requested key matched none of the supplied sortable columns.
    #[error("sort property '{0}' not found")]
    SortPropertyNotFound(String),

    /// A requested key matched no alias and none of the supplied sortable columns.
    #[error("sort alias '{0}' not found")]
    SortAliasNotFound(String),

    /// The single-value rendering of a parameter holding several values was requested.
    #[error("query parameter '{name}' holds {count} values, expected exactly one")]
    MultiValuedParameter { name: String, count: usize },

    /// A sort parameter could not be parsed.
    #[error("invalid sort parameter '{0}'")]
    InvalidSortParameter(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CriteriaError>;

impl CriteriaError {
    /// Whether the error was caused by request input rather than by configuration or misuse.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SortPropertyNotFound(_) | Self::SortAliasNotFound(_) | Self::InvalidSortParameter(_)
        )
    }

    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn user_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            "An internal error occurred".to_string()
        }
    }

    fn log(&self) {
        if self.is_client_error() {
            tracing::debug!(error = %self, "Rejected sort request");
        } else {
            tracing::error!(error = %self, "Criteria configuration error");
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for CriteriaError {
    fn into_response(self) -> Response {
        self.log();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_misses_are_client_errors() {
        assert!(CriteriaError::SortAliasNotFound("x".into()).is_client_error());
        assert!(CriteriaError::SortPropertyNotFound("x".into()).is_client_error());
        assert!(CriteriaError::InvalidSortParameter("x,up".into()).is_client_error());
    }

    #[test]
    fn test_configuration_errors_are_not_client_errors() {
        assert!(!CriteriaError::DuplicateSortAlias("a".into()).is_client_error());
        assert!(!CriteriaError::ConflictingDefaultOrdering.is_client_error());
        assert!(!CriteriaError::NoSortTargets.is_client_error());
        assert!(
            !CriteriaError::MultiValuedParameter {
                name: "id.in".into(),
                count: 2
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_status_codes() {
        let response = CriteriaError::SortAliasNotFound("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = CriteriaError::NoSortTargets.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages_name_the_offending_key() {
        let err = CriteriaError::SortAliasNotFound("popularity".into());
        assert_eq!(err.to_string(), "sort alias 'popularity' not found");
        assert_eq!(err.user_message(), "sort alias 'popularity' not found");

        let err = CriteriaError::DuplicateSortAlias("name".into());
        assert_eq!(err.user_message(), "An internal error occurred");
    }
}
