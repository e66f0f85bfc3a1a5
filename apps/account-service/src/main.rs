//! # Account Service サーバー
//!
//! ユーザー登録とログインを提供する HTTP サーバー。
//!
//! ## 起動方法
//!
//! ```bash
//! # 環境変数を設定（.env でも可）
//! export DATABASE_URL=sqlite://user.db
//! export STATIC_DIR=static
//!
//! cargo run -p kagi-account-service
//! ```
//!
//! 設定項目は [`kagi_account_service::config`] を参照。

use std::sync::Arc;

use kagi_account_service::{
    app_builder::build_app,
    config::AccountConfig,
    handler::ReadinessState,
    usecase::{CredentialStore, CredentialStoreImpl},
};
use kagi_infra::{
    Argon2PasswordHasher,
    PasswordHasher,
    db,
    repository::{SqliteUserRepository, UserRepository},
};
use kagi_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env());

    let config = AccountConfig::from_env()?;

    tracing::info!(
        "Account Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool).await?;
    tracing::info!("マイグレーションを適用しました");

    if config.reset_schema {
        db::reset_schema(&pool).await?;
    }

    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    let user_repository: Arc<dyn UserRepository> =
        Arc::new(SqliteUserRepository::new(pool.clone()));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let store: Arc<dyn CredentialStore> =
        Arc::new(CredentialStoreImpl::new(user_repository, password_hasher));

    let app = build_app(&config, store, readiness_state);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        "Account Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("データベース接続を閉じました");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // シグナルを待てない場合はプロセス終了まで動かし続ける
        tracing::error!(error = %e, "シグナルハンドラの登録に失敗しました");
        std::future::pending::<()>().await;
    }
    tracing::info!("シャットダウンを開始します");
}
