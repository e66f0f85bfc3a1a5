//! # ヘルスチェックハンドラ
//!
//! - `GET /health` - プロセスの稼働確認（Liveness）
//! - `GET /health/ready` - データベースへの疎通確認（Readiness）
//!
//! レスポンス型は [`kagi_shared::HealthResponse`] と [`kagi_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode};
use kagi_infra::db;
use kagi_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use sqlx::SqlitePool;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Readiness Check の共有状態
pub struct ReadinessState {
    pub pool: SqlitePool,
}

/// Account Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check エンドポイント
///
/// データベースに `SELECT 1` を発行し、失敗またはタイムアウトした場合は 503 を返す。
pub async fn readiness_check(
    State(state): State<Arc<ReadinessState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match tokio::time::timeout(CHECK_TIMEOUT, db::ping(&state.pool)).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness Check: データベース接続に失敗");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("Readiness Check: データベース接続がタイムアウト");
            CheckStatus::Error
        }
    };

    let response = ReadinessResponse::from_checks(BTreeMap::from([(
        "database".to_string(),
        database,
    )]));
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
