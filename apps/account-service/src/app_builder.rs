//! # Account Service アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use kagi_shared::observability::make_request_span;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::AccountConfig,
    handler::{
        AccountState,
        HomeState,
        ReadinessState,
        create_user,
        health_check,
        homepage,
        login,
        readiness_check,
    },
    usecase::CredentialStore,
};

/// ルーターを組み立てる
///
/// `/` は `index.html` を返し、どのルートにも一致しないパスは静的ディレクトリから配信する。
pub fn build_app(
    config: &AccountConfig,
    store: Arc<dyn CredentialStore>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let account_state = Arc::new(AccountState {
        store: store.clone(),
    });
    let home_state = Arc::new(HomeState {
        store,
        index_path: config.index_path(),
        log_users: config.log_users,
    });

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/", get(homepage))
                .with_state(home_state),
        )
        .route("/user", post(create_user))
        .route("/user/login", post(login))
        .with_state(account_state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
