//! # Account Service エラー定義
//!
//! Account Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | HTTP ステータス | 本文 |
//! |-------|----------------|------|
//! | `BadRequest` | 400 | `{"error": "<詳細>"}` |
//! | `AuthenticationFailed` | 401 | `{"error": "Authentication Failed"}` |
//! | `Storage` / `Internal` | 500 | `{"error": "Internal Server Error"}` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kagi_domain::DomainError;
use kagi_infra::InfraError;
use kagi_shared::ErrorResponse;
use thiserror::Error;

/// Account Service で発生するエラー
#[derive(Debug, Error)]
pub enum AccountError {
    /// 入力不足・不正なフォーム
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 認証失敗
    ///
    /// ユーザーが存在しない場合とパスワード不一致を区別しない。
    #[error("認証に失敗しました")]
    AuthenticationFailed,

    /// 永続化層のエラー（接続失敗、制約違反など）
    #[error("ストレージエラー: {0}")]
    Storage(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for AccountError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AccountError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(detail))
            }
            AccountError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::authentication_failed(),
            ),
            AccountError::Storage(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "ストレージエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
            AccountError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal_error(),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[rstest]
    #[case(AccountError::BadRequest("username is required".into()), StatusCode::BAD_REQUEST, "username is required")]
    #[case(AccountError::AuthenticationFailed, StatusCode::UNAUTHORIZED, "Authentication Failed")]
    #[case(AccountError::Storage(InfraError::unexpected("disk full")), StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    #[case(AccountError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    #[tokio::test]
    async fn test_エラーからレスポンスへの変換(
        #[case] error: AccountError,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), expected_status);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": expected_message })
        );
    }

    #[test]
    fn test_ドメインのバリデーションエラーはbad_request() {
        let error: AccountError = DomainError::Validation("username is required".into()).into();

        assert!(matches!(error, AccountError::BadRequest(msg) if msg == "username is required"));
    }
}
