//! Route handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use super::state::AppState;
use crate::error::{AnalyzeError, TransportError};
use crate::models::{AnalysisRequest, ErrorResponse};

/// `POST /analyze`: classify the text for emotion and topics.
///
/// The body is read as JSON whatever its `Content-Type`.
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    let req: AnalysisRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, "Rejected request body");
            let body = ErrorResponse::new(format!("Invalid request body: {}", e));
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match state.analyzer.analyze(&req.text).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            warn!(stage = %e.stage(), error = %e, "Analysis failed");
            let status = error_status(&e, state.error_status);
            (status, Json(e.to_response())).into_response()
        }
    }
}

/// Status for a failed analysis. Without `strict` every failure is a 200.
fn error_status(err: &AnalyzeError, strict: bool) -> StatusCode {
    if !strict {
        return StatusCode::OK;
    }
    match err {
        AnalyzeError::Transport {
            source: TransportError::Timeout(_),
            ..
        } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;

    #[test]
    fn test_error_status() {
        let api = AnalyzeError::SentimentApiError("loading".into());
        assert_eq!(error_status(&api, false), StatusCode::OK);
        assert_eq!(error_status(&api, true), StatusCode::BAD_GATEWAY);

        let timeout = AnalyzeError::Transport {
            stage: Stage::Topic,
            source: TransportError::Timeout(30),
        };
        assert_eq!(error_status(&timeout, false), StatusCode::OK);
        assert_eq!(error_status(&timeout, true), StatusCode::GATEWAY_TIMEOUT);
    }
}
