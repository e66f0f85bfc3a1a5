//! # SQLite データベース接続管理
//!
//! データベース接続プールの作成、マイグレーション、スキーマの初期化を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 起動時に一度だけ作成し、リポジトリへ注入して共有する
//! - **リクエストスコープの接続**: 各 SQL 文はプールから接続を借り、文の完了
//!   （またはエラー・キャンセルによる future のドロップ）時に必ず返却される
//! - **自動コミット**: 書き込みは 1 文ずつ実行し、複数文のトランザクションは使わない
//!
//! ## インメモリ DB
//!
//! `sqlite::memory:` は接続ごとに別のデータベースになるため、
//! 接続数 1・アイドルタイムアウトなしのプールを作成する。テストで使用する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use kagi_infra::db;
//!
//! let pool = db::create_pool("sqlite://user.db").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// `user` テーブルを作り直す DDL
///
/// `migrations/` の初期マイグレーションと同じ定義。
const DROP_USER_TABLE: &str = r#"DROP TABLE IF EXISTS "user""#;
const CREATE_USER_TABLE: &str = r#"
CREATE TABLE "user" (
    user_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    pw_hash  TEXT NOT NULL
)
"#;

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// SQLite 接続プールを作成する
///
/// ファイルが存在しない場合は作成する。
///
/// # 設定値
///
/// - `max_connections(5)`: ファイル DB の最大接続数
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, InfraError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// データベースマイグレーションを実行する
///
/// 適用済みのマイグレーションはスキップされる。
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// `user` テーブルを削除して作り直す
///
/// 全ユーザーが削除され、ID の採番も 1 から再開する。
/// 初期化とテストでのみ使用する。
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), InfraError> {
    let mut tx = pool.begin().await?;
    sqlx::query(DROP_USER_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_USER_TABLE).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::warn!("user テーブルを初期化しました");
    Ok(())
}

/// データベースへの疎通を確認する（Readiness Check 用）
pub async fn ping(pool: &SqlitePool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
