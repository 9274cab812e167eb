//! 凭据验证能力
//!
//! 认证后端的抽象。校验层和 HTTP 映射只依赖此 trait，
//! 替换为真实的身份存储时不需要改动它们。

use async_trait::async_trait;

use crate::models::auth::{AuthOutcome, LoginCredentials};

#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// 对已校验的凭据给出唯一的认证结果
    async fn authenticate(&self, credentials: &LoginCredentials) -> AuthOutcome;
}
