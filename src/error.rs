use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::gemini::ProviderError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing required fields: {}", .required.join(", "))]
    MissingFields {
        required: Vec<&'static str>,
        missing: Vec<&'static str>,
    },

    #[error("Invalid request body: {0}")]
    BadBody(#[from] JsonRejection),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("AI returned malformed JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingFields { .. } | RelayError::BadBody(_) => StatusCode::BAD_REQUEST,
            RelayError::Provider(_) | RelayError::MalformedOutput(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Category label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingFields { .. } => "missing_fields",
            RelayError::BadBody(_) => "bad_body",
            RelayError::Provider(_) => "provider",
            RelayError::MalformedOutput(_) => "malformed_output",
        }
    }
}

/// Fails with [`RelayError::MissingFields`] when any `(name, present)` pair is absent.
pub fn require_fields(fields: &[(&'static str, bool)]) -> Result<(), RelayError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(RelayError::MissingFields {
        required: fields.iter().map(|(name, _)| *name).collect(),
        missing,
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A route failure: the error, the route's public message and whether detail is echoed.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: RelayError,
    pub public_message: &'static str,
    pub expose_detail: bool,
}

impl ApiFailure {
    pub fn new(public_message: &'static str, error: RelayError, expose_detail: bool) -> Self {
        let status = error.status();
        if status.is_server_error() {
            error!(kind = error.kind(), error = %error, "{public_message}");
        } else if let RelayError::MissingFields { missing, .. } = &error {
            warn!(kind = error.kind(), ?missing, "{public_message}");
        } else {
            warn!(kind = error.kind(), error = %error, "{public_message}");
        }
        Self {
            error,
            public_message,
            expose_detail,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let detail = self.expose_detail.then(|| self.error.to_string());
        let body = match &self.error {
            RelayError::MissingFields { .. } => ErrorBody {
                error: self.error.to_string(),
                message: None,
            },
            RelayError::BadBody(rejection) => ErrorBody {
                error: "Invalid request body".into(),
                message: self.expose_detail.then(|| rejection.body_text()),
            },
            RelayError::Provider(_) | RelayError::MalformedOutput(_) => ErrorBody {
                error: self.public_message.into(),
                message: detail,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_require_fields_lists_all_required() {
        let err = require_fields(&[("day", true), ("type", false), ("currentName", true)])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: day, type, currentName"
        );
        match err {
            RelayError::MissingFields { missing, .. } => assert_eq!(missing, vec!["type"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_require_fields_ok() {
        assert!(require_fields(&[("dishName", true), ("summary", true)]).is_ok());
    }

    #[test]
    fn test_status_mapping() {
        let missing = require_fields(&[("a", false)]).unwrap_err();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::Provider(ProviderError::InvalidResponse).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let parse = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        assert_eq!(
            RelayError::from(parse).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_omits_absent_message() {
        let body = ErrorBody {
            error: "Failed to fetch recipe".into(),
            message: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Failed to fetch recipe"}"#
        );
    }
}
