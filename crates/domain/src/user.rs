//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は `user.user_id`（AUTOINCREMENT）の整数をラップする
//! - **不変性**: ユーザーは登録時に作成され、以後更新も削除もされない
//! - **ユーザー名は一意ではない**: 同じユーザー名で複数のユーザーが存在しうる
//!
//! ## 使用例
//!
//! ```rust
//! use kagi_domain::{
//!     password::PasswordHash,
//!     user::{User, UserId, Username},
//! };
//!
//! let user = User::new(
//!     UserId::from_i64(1),
//!     Username::new("alice").unwrap(),
//!     PasswordHash::new("$argon2id$v=19$..."),
//! );
//! assert_eq!(user.id().as_i64(), 1);
//! assert_eq!(user.username().as_str(), "alice");
//! ```

use derive_more::Display;

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID
///
/// ストアが作成時に採番する。単調増加で再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct UserId(i64);

impl UserId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// ユーザー名（値オブジェクト）
///
/// 大文字小文字を区別し、正規化しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Username(String);

impl Username {
    /// ユーザー名を作成する
    ///
    /// # エラー
    ///
    /// 空文字列の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("username is required".to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `username` と `password_hash` は常に存在する（`NOT NULL`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    username:      Username,
    password_hash: PasswordHash,
}

impl User {
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
