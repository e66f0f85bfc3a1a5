//! # Account Service 設定
//!
//! 環境変数から Account Service サーバーの設定を読み込む。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `ACCOUNT_HOST` | `127.0.0.1` | バインドアドレス |
//! | `ACCOUNT_PORT` | `5000` | ポート番号 |
//! | `DATABASE_URL` | `sqlite://user.db` | SQLite 接続 URL |
//! | `STATIC_DIR` | `static` | `index.html` と静的ファイルのディレクトリ |
//! | `ACCOUNT_LOG_USERS` | `false` | `GET /` でユーザー一覧を debug ログに出力する |
//! | `ACCOUNT_RESET_SCHEMA` | `false` | 起動時に `user` テーブルを作り直す |

use std::{env, path::PathBuf};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   #[error("{key} は有効なポート番号である必要があります: {value:?}")]
   InvalidPort { key: &'static str, value: String },

   #[error("{key} は true/false/1/0 のいずれかである必要があります: {value:?}")]
   InvalidFlag { key: &'static str, value: String },
}

/// Account Service サーバーの設定
#[derive(Debug, Clone)]
pub struct AccountConfig {
   pub host:         String,
   pub port:         u16,
   pub database_url: String,
   pub static_dir:   PathBuf,
   /// `GET /` でユーザー一覧を debug ログに出力するか
   pub log_users:    bool,
   /// 起動時に `user` テーブルを作り直すか
   pub reset_schema: bool,
}

impl AccountConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意のキー参照関数から設定を読み込む
   ///
   /// 未設定のキーはデフォルト値を使う。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let port = match lookup("ACCOUNT_PORT") {
         Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
            key: "ACCOUNT_PORT",
            value,
         })?,
         None => 5000,
      };

      Ok(Self {
         host: lookup("ACCOUNT_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
         port,
         database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://user.db".to_string()),
         static_dir: lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static")),
         log_users: parse_flag("ACCOUNT_LOG_USERS", lookup("ACCOUNT_LOG_USERS"))?,
         reset_schema: parse_flag("ACCOUNT_RESET_SCHEMA", lookup("ACCOUNT_RESET_SCHEMA"))?,
      })
   }

   /// トップページとして配信する HTML のパス
   pub fn index_path(&self) -> PathBuf {
      self.static_dir.join("index.html")
   }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
   let Some(value) = value else {
      return Ok(false);
   };
   match value.to_ascii_lowercase().as_str() {
      "true" | "1" => Ok(true),
      "false" | "0" | "" => Ok(false),
      _ => Err(ConfigError::InvalidFlag { key, value }),
   }
}
