//! テスト共通フィクスチャ
//!
//! マイグレーション適用済みのインメモリ SQLite プールを提供する。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use kagi_domain::{password::PasswordHash, user::Username};
use kagi_infra::db;
use sqlx::SqlitePool;

/// マイグレーション適用済みのインメモリプールを作成する
pub async fn setup_pool() -> SqlitePool {
    let pool = db::create_pool("sqlite::memory:")
        .await
        .expect("インメモリプールの作成に失敗");
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗");
    pool
}

pub fn username(value: &str) -> Username {
    Username::new(value).expect("テスト用ユーザー名が不正")
}

/// テスト用のダミーダイジェスト
///
/// リポジトリはダイジェストの形式を検査しないため、任意の文字列でよい。
pub fn digest(value: &str) -> PasswordHash {
    PasswordHash::new(format!("digest:{value}"))
}
