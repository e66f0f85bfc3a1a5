//! # UserRepository
//!
//! `user` テーブルの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 1 文**: すべての操作は単一の SQL 文で完結し、自動コミットされる
//! - **ID 昇順**: 複数行を返す操作は常に `user_id` 昇順で返す
//! - **ハッシュ比較はしない**: ダイジェストはソルト付きのため SQL で一致判定できない。
//!   照合は呼び出し側（Credential Store）で行う

use async_trait::async_trait;
use kagi_domain::{
    password::PasswordHash,
    user::{User, UserId, Username},
};
use sqlx::SqlitePool;

use crate::error::InfraError;

/// `user` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id:  i64,
    username: String,
    pw_hash:  String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username).map_err(|e| {
            InfraError::unexpected(format!("user_id={} のユーザー名が不正: {e}", row.user_id))
        })?;

        Ok(User::new(
            UserId::from_i64(row.user_id),
            username,
            PasswordHash::new(row.pw_hash),
        ))
    }
}

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成する
    ///
    /// ユーザー名の重複は検査しない。
    ///
    /// # 戻り値
    ///
    /// - `Ok(user)`: 採番された ID を含む作成済みユーザー
    /// - `Err(_)`: データベースエラー
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError>;

    /// ユーザー名が完全一致（大文字小文字を区別）するユーザーを ID 昇順で取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(users)`: 該当なしの場合は空
    /// - `Err(_)`: データベースエラー
    async fn find_by_username(&self, username: &Username) -> Result<Vec<User>, InfraError>;

    /// 全ユーザーを ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<User>, InfraError>;
}

/// SQLite 実装の UserRepository
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO "user" (username, pw_hash)
            VALUES (?, ?)
            RETURNING user_id, username, pw_hash
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_username(&self, username: &Username) -> Result<Vec<User>, InfraError> {
        // SQLite の = は TEXT に対して BINARY 照合（大文字小文字を区別）
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, username, pw_hash
            FROM "user"
            WHERE username = ?
            ORDER BY user_id ASC
            "#,
        )
        .bind(username.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT user_id, username, pw_hash
            FROM "user"
            ORDER BY user_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}
