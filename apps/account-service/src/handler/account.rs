//! # アカウントハンドラ
//!
//! ユーザー登録とログインのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /user` - ユーザー登録
//! - `POST /user/login` - ログイン
//!
//! どちらも `application/x-www-form-urlencoded` の `username` と `password` を受け取り、
//! 成功時は `{"id": <整数>, "username": "<ユーザー名>"}` を返す。

use std::sync::Arc;

use axum::{
    Form,
    Json,
    extract::{State, rejection::FormRejection},
};
use kagi_domain::{
    password::PlainPassword,
    user::{User, Username},
};
use serde::{Deserialize, Serialize};

use crate::{error::AccountError, usecase::CredentialStore};

/// アカウントハンドラの共有状態
pub struct AccountState {
    pub store: Arc<dyn CredentialStore>,
}

// --- リクエスト/レスポンス型 ---

/// 登録・ログインフォーム
///
/// 欠落したフィールドを 400 として返すため、どちらも `Option` で受ける。
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsForm {
    fn into_credentials(self) -> Result<(Username, PlainPassword), AccountError> {
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;
        Ok((Username::new(username)?, PlainPassword::new(password)))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AccountError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AccountError::BadRequest(format!("{field} is required")))
}

/// ユーザーレスポンス
///
/// ダイジェストは含めない。
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id:       i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id:       user.id().as_i64(),
            username: user.username().as_str().to_string(),
        }
    }
}

// --- ハンドラ ---

/// POST /user
///
/// ユーザーを登録する。同じユーザー名でも毎回新しい ID が採番される。
pub async fn create_user(
    State(state): State<Arc<AccountState>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Json<UserResponse>, AccountError> {
    let Form(form) = form.map_err(|e| AccountError::BadRequest(e.body_text()))?;
    let (username, password) = form.into_credentials()?;

    let user = state.store.create(&username, &password).await?;

    Ok(Json(user.into()))
}

/// POST /user/login
///
/// ユーザー名とパスワードで認証する。
/// 失敗理由（ユーザー不在・パスワード不一致）はレスポンスで区別しない。
pub async fn login(
    State(state): State<Arc<AccountState>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Json<UserResponse>, AccountError> {
    let Form(form) = form.map_err(|e| AccountError::BadRequest(e.body_text()))?;
    let (username, password) = form.into_credentials()?;

    let user = state.store.authenticate(&username, &password).await?;

    Ok(Json(user.into()))
}
