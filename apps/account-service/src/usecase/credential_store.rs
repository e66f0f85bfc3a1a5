//! # Credential Store
//!
//! ユーザー名とパスワードダイジェストの組を管理する。
//!
//! ## タイミング攻撃対策
//!
//! ユーザー名に一致する行がない場合も、送られたパスワードで一度ハッシュ計算を行い、
//! 存在するユーザーへの照合と処理時間を揃える。

use std::sync::Arc;

use kagi_domain::{
    password::PlainPassword,
    user::{User, Username},
};
use kagi_infra::{PasswordHasher, repository::UserRepository};

use crate::error::AccountError;

/// Credential Store の実装
pub struct CredentialStoreImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CredentialStoreImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// パスワードをハッシュ化してユーザーを保存する
    pub async fn create(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError> {
        let hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let user = self.user_repository.insert(username, &hash).await?;

        tracing::info!(user.id = %user.id(), "ユーザーを作成しました");
        Ok(user)
    }

    /// 同名ユーザーを ID 昇順に照合し、最初に一致したユーザーを返す
    ///
    /// 保存済みダイジェストが壊れている行は警告を出して読み飛ばす。
    /// その行でもダミーのハッシュ計算を行い、正常な行と処理時間を揃える。
    pub async fn authenticate(
        &self,
        username: &Username,
        password: &PlainPassword,
    ) -> Result<User, AccountError> {
        let candidates = self.user_repository.find_by_username(username).await?;

        if candidates.is_empty() {
            self.dummy_verification(password);
            tracing::info!("認証失敗: ユーザーが存在しません");
            return Err(AccountError::AuthenticationFailed);
        }

        for user in candidates {
            match self.password_hasher.verify(password, user.password_hash()) {
                Ok(result) if result.is_match() => {
                    tracing::info!(user.id = %user.id(), "認証成功");
                    return Ok(user);
                }
                Ok(_) => {}
                Err(e) => {
                    // 照合前に失敗した分のハッシュ計算を補う
                    self.dummy_verification(password);
                    tracing::warn!(
                        user.id = %user.id(),
                        error = %e,
                        "ダイジェストが不正なため照合をスキップします"
                    );
                }
            }
        }

        tracing::info!("認証失敗: パスワード不一致");
        Err(AccountError::AuthenticationFailed)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        Ok(self.user_repository.find_all().await?)
    }

    fn dummy_verification(&self, password: &PlainPassword) {
        // 結果は使わない
        let _ = self.password_hasher.hash(password);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use kagi_domain::{
        password::{PasswordHash, PasswordVerifyResult},
        user::UserId,
    };
    use kagi_infra::InfraError;
    use pretty_assertions::assert_eq;

    use super::*;

    // テスト用スタブ

    #[derive(Default)]
    struct StubUserRepository {
        users:   Mutex<Vec<User>>,
        failing: bool,
    }

    impl StubUserRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                users:   Mutex::new(users),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                users:   Mutex::default(),
                failing: true,
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(
            &self,
            username: &Username,
            password_hash: &PasswordHash,
        ) -> Result<User, InfraError> {
            if self.failing {
                return Err(InfraError::unexpected("connection refused"));
            }
            let mut users = self.users.lock().unwrap();
            let id = UserId::from_i64(users.len() as i64 + 1);
            let user = User::new(id, username.clone(), password_hash.clone());
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_username(&self, username: &Username) -> Result<Vec<User>, InfraError> {
            if self.failing {
                return Err(InfraError::unexpected("connection refused"));
            }
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.username() == username)
                .cloned()
                .collect())
        }

        async fn find_all(&self) -> Result<Vec<User>, InfraError> {
            if self.failing {
                return Err(InfraError::unexpected("connection refused"));
            }
            Ok(self.users.lock().unwrap().clone())
        }
    }

    /// `hashed:<平文>` を返す決定的なハッシャー
    ///
    /// `broken` で始まるダイジェストは照合エラーになる。
    #[derive(Default)]
    struct StubPasswordHasher {
        hash_calls: AtomicUsize,
        failing:    bool,
    }

    impl PasswordHasher for StubPasswordHasher {
        fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
            self.hash_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing {
                return Err(InfraError::password_hash("out of memory"));
            }
            Ok(PasswordHash::new(format!("hashed:{}", password.as_str())))
        }

        fn verify(
            &self,
            password: &PlainPassword,
            hash: &PasswordHash,
        ) -> Result<PasswordVerifyResult, InfraError> {
            if hash.as_str().starts_with("broken") {
                return Err(InfraError::unexpected("invalid digest"));
            }
            Ok(PasswordVerifyResult::from(
                hash.as_str() == format!("hashed:{}", password.as_str()),
            ))
        }
    }

    fn user(id: i64, name: &str, password: &str) -> User {
        User::new(
            UserId::from_i64(id),
            Username::new(name).unwrap(),
            PasswordHash::new(format!("hashed:{password}")),
        )
    }

    fn sut_with(
        repo: StubUserRepository,
        hasher: Arc<StubPasswordHasher>,
    ) -> CredentialStoreImpl {
        CredentialStoreImpl::new(Arc::new(repo), hasher)
    }

    #[tokio::test]
    async fn test_作成したユーザーはハッシュ化されたダイジェストを持つ() {
        let sut = sut_with(StubUserRepository::default(), Arc::default());

        let user = sut
            .create(&Username::new("alice").unwrap(), &PlainPassword::new("secret1"))
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::from_i64(1));
        assert_eq!(user.password_hash().as_str(), "hashed:secret1");
    }

    #[tokio::test]
    async fn test_ハッシュ化に失敗すると内部エラー() {
        let hasher = Arc::new(StubPasswordHasher {
            failing: true,
            ..Default::default()
        });
        let sut = sut_with(StubUserRepository::default(), hasher);

        let result = sut
            .create(&Username::new("alice").unwrap(), &PlainPassword::new("secret1"))
            .await;

        assert!(matches!(result, Err(AccountError::Internal(_))));
    }

    #[tokio::test]
    async fn test_正しいパスワードで認証できる() {
        let sut = sut_with(
            StubUserRepository::with_users(vec![user(1, "alice", "secret1")]),
            Arc::default(),
        );

        let result = sut
            .authenticate(&Username::new("alice").unwrap(), &PlainPassword::new("secret1"))
            .await
            .unwrap();

        assert_eq!(result, user(1, "alice", "secret1"));
    }

    #[tokio::test]
    async fn test_パスワード不一致は認証失敗() {
        let sut = sut_with(
            StubUserRepository::with_users(vec![user(1, "alice", "secret1")]),
            Arc::default(),
        );

        let result = sut
            .authenticate(&Username::new("alice").unwrap(), &PlainPassword::new("wrong"))
            .await;

        assert!(matches!(result, Err(AccountError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_存在しないユーザーでもダミーのハッシュ計算を行う() {
        // Given
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut_with(StubUserRepository::default(), hasher.clone());

        // When
        let result = sut
            .authenticate(&Username::new("nobody").unwrap(), &PlainPassword::new("x"))
            .await;

        // Then
        assert!(matches!(result, Err(AccountError::AuthenticationFailed)));
        assert_eq!(hasher.hash_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_同名ユーザーは一致したうち最小のidを返す() {
        let sut = sut_with(
            StubUserRepository::with_users(vec![
                user(2, "bob", "pw"),
                user(3, "bob", "pw2"),
                user(4, "bob", "pw2"),
            ]),
            Arc::default(),
        );

        let first = sut
            .authenticate(&Username::new("bob").unwrap(), &PlainPassword::new("pw"))
            .await
            .unwrap();
        let second = sut
            .authenticate(&Username::new("bob").unwrap(), &PlainPassword::new("pw2"))
            .await
            .unwrap();

        assert_eq!(first.id(), UserId::from_i64(2));
        assert_eq!(second.id(), UserId::from_i64(3));
    }

    #[tokio::test]
    async fn test_不正なダイジェストの行は読み飛ばす() {
        let broken = User::new(
            UserId::from_i64(1),
            Username::new("carol").unwrap(),
            PasswordHash::new("broken-digest"),
        );
        let sut = sut_with(
            StubUserRepository::with_users(vec![broken, user(2, "carol", "pw")]),
            Arc::default(),
        );

        let result = sut
            .authenticate(&Username::new("carol").unwrap(), &PlainPassword::new("pw"))
            .await
            .unwrap();

        assert_eq!(result.id(), UserId::from_i64(2));
    }

    #[tokio::test]
    async fn test_不正なダイジェストの行でもハッシュ計算を行う() {
        // Given
        let broken = User::new(
            UserId::from_i64(1),
            Username::new("carol").unwrap(),
            PasswordHash::new("broken-digest"),
        );
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut_with(StubUserRepository::with_users(vec![broken]), hasher.clone());

        // When
        let result = sut
            .authenticate(&Username::new("carol").unwrap(), &PlainPassword::new("pw"))
            .await;

        // Then
        assert!(matches!(result, Err(AccountError::AuthenticationFailed)));
        assert_eq!(hasher.hash_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_作成時のストレージエラーはそのまま伝播する() {
        let sut = sut_with(StubUserRepository::failing(), Arc::default());

        let result = sut
            .create(&Username::new("alice").unwrap(), &PlainPassword::new("secret1"))
            .await;

        assert!(matches!(result, Err(AccountError::Storage(_))));
    }

    #[tokio::test]
    async fn test_ストレージエラーはそのまま伝播する() {
        let sut = sut_with(StubUserRepository::failing(), Arc::default());

        let result = sut
            .authenticate(&Username::new("alice").unwrap(), &PlainPassword::new("secret1"))
            .await;

        assert!(matches!(result, Err(AccountError::Storage(_))));
    }

    #[tokio::test]
    async fn test_ユーザー一覧を取得できる() {
        let sut = sut_with(
            StubUserRepository::with_users(vec![user(1, "alice", "a"), user(2, "bob", "b")]),
            Arc::default(),
        );

        let users = sut.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].username().as_str(), "bob");
    }
}
