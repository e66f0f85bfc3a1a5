//! # トップページハンドラ
//!
//! `GET /` で静的ディレクトリの `index.html` を返す。
//!
//! `ACCOUNT_LOG_USERS` が有効な場合、リクエストのたびに全ユーザーを debug ログに出力する。
//! 平文パスワードは保持していないため、出力されるのは ID とユーザー名のみ。

use std::{convert::Infallible, path::PathBuf, sync::Arc};

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::usecase::CredentialStore;

/// トップページハンドラの共有状態
pub struct HomeState {
    pub store:      Arc<dyn CredentialStore>,
    pub index_path: PathBuf,
    pub log_users:  bool,
}

/// GET /
pub async fn homepage(State(state): State<Arc<HomeState>>, request: Request) -> Response {
    if state.log_users {
        log_users(state.store.as_ref()).await;
    }

    let result: Result<_, Infallible> = ServeFile::new(&state.index_path).oneshot(request).await;
    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn log_users(store: &dyn CredentialStore) {
    match store.list_users().await {
        Ok(users) => {
            tracing::debug!(count = users.len(), "登録済みユーザー");
            for user in &users {
                tracing::debug!(
                    user.id = %user.id(),
                    user.username = %user.username(),
                    "ユーザー"
                );
            }
        }
        Err(e) => {
            // ページの配信は続ける
            tracing::warn!(error = %e, "ユーザー一覧の取得に失敗しました");
        }
    }
}
