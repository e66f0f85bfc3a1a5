//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `account`: ユーザー登録・ログイン
//! - `home`: トップページ
//! - `health`: ヘルスチェック

pub mod account;
pub mod health;
pub mod home;

pub use account::{AccountState, create_user, login};
pub use health::{ReadinessState, health_check, readiness_check};
pub use home::{HomeState, homepage};
