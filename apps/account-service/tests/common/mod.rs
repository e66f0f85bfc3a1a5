//! テスト共通フィクスチャ
//!
//! インメモリ SQLite と軽量パラメータの Argon2id で本物のルーターを組み立てる。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use kagi_account_service::{
    app_builder::build_app,
    config::AccountConfig,
    handler::ReadinessState,
    usecase::CredentialStoreImpl,
};
use kagi_infra::{Argon2PasswordHasher, db, repository::SqliteUserRepository};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool:   SqlitePool,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let pool = db::create_pool("sqlite::memory:")
            .await
            .expect("インメモリプールの作成に失敗");
        db::run_migrations(&pool)
            .await
            .expect("マイグレーションの実行に失敗");

        let hasher =
            Argon2PasswordHasher::with_params(1024, 1, 1).expect("Argon2 パラメータが不正");
        let store = Arc::new(CredentialStoreImpl::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(hasher),
        ));

        let mut config =
            AccountConfig::from_lookup(|_| None).expect("デフォルト設定の読み込みに失敗");
        config.static_dir = static_dir();

        let router = build_app(
            &config,
            store,
            Arc::new(ReadinessState { pool: pool.clone() }),
        );

        Self { router, pool }
    }

    /// フォームを POST し、ステータスと JSON 本文を返す
    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// GET し、ステータスと本文を返す
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }
}

pub fn static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../static"))
}
