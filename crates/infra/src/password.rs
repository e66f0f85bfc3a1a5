//! # パスワードハッシュ
//!
//! Argon2id によるダイジェスト生成と照合を提供する。
//!
//! ダイジェストは PHC 文字列形式（`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`）で、
//! ソルトとパラメータを内包する。照合時はダイジェスト側のパラメータを使うため、
//! パラメータを変更しても既存ユーザーのダイジェストはそのまま検証できる。

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use kagi_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化と照合を担当するトレイト
pub trait PasswordHasher: Send + Sync {
    /// ランダムなソルトでダイジェストを生成する
    ///
    /// # Errors
    ///
    /// - ハッシュ計算に失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// 平文パスワードとダイジェストを照合する
    ///
    /// # Errors
    ///
    /// - ダイジェストが PHC 文字列として不正な場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id による実装
///
/// デフォルトは OWASP 推奨パラメータ（Memory: 19 MiB, Iterations: 2, Parallelism: 1）。
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }

    /// パラメータを指定して作成する
    ///
    /// 結合テストでは計算コストを下げるために使う。
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, InfraError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| InfraError::password_hash(format!("不正な Argon2 パラメータ: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// 指定したソルト（B64 エンコード）でダイジェストを生成する
    ///
    /// 同じパスワードとソルトからは常に同じダイジェストが得られることの検証に使う。
    #[cfg(test)]
    fn hash_with_salt(
        &self,
        password: &PlainPassword,
        salt: &str,
    ) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| InfraError::password_hash(format!("不正なソルト: {e}")))?;
        self.hash_with(password, &salt)
    }

    fn hash_with(
        &self,
        password: &PlainPassword,
        salt: &SaltString,
    ) -> Result<PasswordHash, InfraError> {
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), salt)
            .map_err(|e| InfraError::password_hash(e.to_string()))?;

        Ok(PasswordHash::new(hash.to_string()))
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hash_with(password, &salt)
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}
