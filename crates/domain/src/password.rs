//! # パスワード
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録・ログイン時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | `user.pw_hash` 列に保存されるダイジェスト |
//! | [`PasswordVerifyResult`] | 検証結果 | 平文とダイジェストの照合結果 |
//!
//! 平文パスワードは保存しない。永続化されるのは一方向ダイジェストのみ。

use std::fmt;

/// 平文パスワード
///
/// 空文字列も受け付ける（必須チェックはハンドラの責務）。
/// Debug 出力では値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl PlainPassword {
   pub fn new(value: impl Into<String>) -> Self {
      Self(value.into())
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// ハッシュ関数へ渡すバイト列を取得する
   pub fn as_bytes(&self) -> &[u8] {
      self.0.as_bytes()
   }
}

impl fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("PlainPassword([REDACTED])")
   }
}

/// パスワードハッシュ
///
/// PHC 文字列形式（`$argon2id$v=19$...`）のダイジェスト。
/// 一度保存されたダイジェストは書き換えない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ダイジェスト文字列から作成する（主に DB からの復元時）
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
   Match,
   Mismatch,
}

impl PasswordVerifyResult {
   pub fn is_match(self) -> bool {
      self == Self::Match
   }
}

impl From<bool> for PasswordVerifyResult {
   fn from(matched: bool) -> Self {
      if matched { Self::Match } else { Self::Mismatch }
   }
}
