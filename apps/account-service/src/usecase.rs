//! # ユースケース層
//!
//! Account Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラはトレイト経由で Credential Store を呼び出す
//! - **依存性注入**: リポジトリとパスワードハッシャーを外部から注入
//! - **薄いハンドラ**: フォームの検査以外のロジックはユースケースに集約

pub mod credential_store;

use async_trait::async_trait;
pub use credential_store::CredentialStoreImpl;
use kagi_domain::{
    password::PlainPassword,
    user::{User, Username},
};

use crate::error::AccountError;

/// Credential Store トレイト
///
/// ユーザーの作成・認証・一覧取得を定義する。
/// 具体的な実装は `CredentialStoreImpl` で提供される。
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// ユーザーを作成する
    ///
    /// 同じユーザー名が既に存在していても新しいユーザーとして登録する。
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 採番された ID を持つユーザー
    /// - `Err(AccountError::Storage)`: 永続化に失敗した場合
    async fn create(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError>;

    /// ユーザー名とパスワードで認証する
    ///
    /// 同名のユーザーが複数いる場合は、パスワードが一致したもののうち
    /// ID が最も小さいユーザーを返す。
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 認証されたユーザー
    /// - `Err(AccountError::AuthenticationFailed)`: ユーザーが存在しない、またはパスワード不一致
    async fn authenticate(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError>;

    /// 全ユーザーを ID 昇順で取得する
    async fn list_users(&self) -> Result<Vec<User>, AccountError>;
}

#[async_trait]
impl CredentialStore for CredentialStoreImpl {
    async fn create(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError> {
        self.create(username, password).await
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError> {
        self.authenticate(username, password).await
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        self.list_users().await
    }
}
