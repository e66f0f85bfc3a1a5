//! # Kagi インフラ層
//!
//! 永続化とパスワードハッシュの具体実装を提供する。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite への接続プール管理とマイグレーション
//! - **リポジトリ実装**: `user` テーブルへの読み書き
//! - **パスワードハッシュ**: Argon2id によるダイジェスト生成と照合
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードハッシュ
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use kagi_infra::{db, repository::SqliteUserRepository};
//!
//! async fn setup() -> Result<(), kagi_infra::InfraError> {
//!     let pool = db::create_pool("sqlite://user.db").await?;
//!     db::run_migrations(&pool).await?;
//!     let repo = SqliteUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
