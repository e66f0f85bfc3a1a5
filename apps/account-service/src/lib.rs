//! # Account Service ライブラリ
//!
//! ユーザー登録・ログインの Credential Store と HTTP ハンドラを公開する。
//! `main.rs` と結合テストの両方から同じルーターを組み立てるためにライブラリ化している。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
