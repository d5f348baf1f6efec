use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use market_core::UnknownClassError;
use serde::Serialize;
use session::ActionError;
use valuation::InvestmentError;

use crate::state::SessionId;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error("company {0} not found")]
    CompanyNotFound(usize),
    #[error(transparent)]
    UnknownClass(#[from] UnknownClassError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("session id space exhausted")]
    SessionIdOverflow,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "session_not_found",
            Self::CompanyNotFound(_) => "unknown_company",
            Self::UnknownClass(_) => "unknown_class",
            Self::Action(err) => err.code(),
            Self::SessionIdOverflow => "session_id_overflow",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) | Self::CompanyNotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownClass(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Action(ActionError::MarketClosed | ActionError::EventActive) => {
                StatusCode::CONFLICT
            }
            Self::Action(ActionError::Investment(InvestmentError::UnknownCompany { .. })) => {
                StatusCode::NOT_FOUND
            }
            Self::Action(ActionError::Investment(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::SessionIdOverflow => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use session::ActionError;
    use valuation::InvestmentError;

    use super::ApiError;

    #[test]
    fn investment_errors_map_to_client_statuses() {
        let cases = [
            (
                ApiError::Action(ActionError::Investment(InvestmentError::InsufficientBalance {
                    requested: 3_000.0,
                    available: 2_000.0,
                })),
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_balance",
            ),
            (
                ApiError::Action(ActionError::Investment(InvestmentError::UnknownCompany {
                    index: 9,
                })),
                StatusCode::NOT_FOUND,
                "unknown_company",
            ),
            (
                ApiError::Action(ActionError::EventActive),
                StatusCode::CONFLICT,
                "event_active",
            ),
            (
                ApiError::SessionNotFound(4),
                StatusCode::NOT_FOUND,
                "session_not_found",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.code(), code);
        }
    }
}
