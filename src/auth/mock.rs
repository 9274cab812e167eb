//! 模拟认证
//!
//! 固定两个账号：
//! - `locked@example.com`：无论密码为何，均返回账户锁定
//! - `test@example.com` / `password123`：认证成功
//!
//! 其余组合一律认证失败。调用之间不保存任何状态。

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;

use super::verifier::CredentialVerifier;
use crate::models::auth::{AuthOutcome, LoginCredentials, UserRecord};

pub const LOCKED_EMAIL: &str = "locked@example.com";
pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_USER_ID: &str = "user_12345";
pub const TEST_USER_NAME: &str = "テストユーザー";

#[derive(Debug, Clone, Copy, Default)]
pub struct MockAuthenticator;

impl MockAuthenticator {
    pub fn new() -> Self {
        Self
    }

    /// 判定顺序：锁定 > 成功 > 失败
    pub fn decide(&self, credentials: &LoginCredentials) -> AuthOutcome {
        let email = credentials.email();

        if email == LOCKED_EMAIL {
            return AuthOutcome::Locked;
        }

        if email == TEST_EMAIL && credentials.password().expose_secret() == TEST_PASSWORD {
            return AuthOutcome::Success {
                user: UserRecord {
                    id: TEST_USER_ID.to_string(),
                    email: email.to_string(),
                    name: TEST_USER_NAME.to_string(),
                    created_at: Utc::now(),
                },
            };
        }

        AuthOutcome::InvalidCredentials
    }
}

#[async_trait]
impl CredentialVerifier for MockAuthenticator {
    async fn authenticate(&self, credentials: &LoginCredentials) -> AuthOutcome {
        self.decide(credentials)
    }
}
