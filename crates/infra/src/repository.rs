//! # リポジトリ実装
//!
//! - **データベース抽象化**: sqlx を使用し、SQLite 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でスタブに差し替え可能な設計

pub mod user_repository;

pub use user_repository::{SqliteUserRepository, UserRepository};
