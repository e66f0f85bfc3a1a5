//! # エラーレスポンス
//!
//! アカウント API で共通のエラーレスポンス構造体を提供する。
//!
//! 形状は `{ "error": "<メッセージ>" }` の 1 フィールドのみ。
//! ログイン失敗時の本文 `{"error": "Authentication Failed"}` はクライアントとの
//! 互換性のため固定文言とする。

use serde::{Deserialize, Serialize};

/// 認証失敗時のメッセージ
///
/// ユーザー名不一致とパスワード不一致を区別しない。
pub const AUTHENTICATION_FAILED: &str = "Authentication Failed";

/// 内部エラー時のメッセージ
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 任意のメッセージでエラーレスポンスを作成する
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }

   /// 401 Unauthorized（認証失敗）
   pub fn authentication_failed() -> Self {
      Self::new(AUTHENTICATION_FAILED)
   }

   /// 500 Internal Server Error
   ///
   /// 詳細はログにのみ出力し、クライアントには固定文言を返す。
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_SERVER_ERROR)
   }
}
