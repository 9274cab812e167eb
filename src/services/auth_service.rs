//! 认证服务：校验 → 认证 → 结果映射

use serde_json::Value;
use std::sync::Arc;

use crate::{
    auth::{validate_login, CredentialVerifier, MockAuthenticator},
    error::AppError,
    models::auth::{AuthOutcome, LoginSuccessResponse},
};

pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    /// 使用固定账号的模拟认证
    pub fn mock() -> Self {
        Self::new(Arc::new(MockAuthenticator::new()))
    }

    /// 用户登录
    ///
    /// 校验失败时直接返回，不会调用认证后端。
    pub async fn login(
        &self,
        raw: &Value,
        client_ip: &str,
    ) -> Result<LoginSuccessResponse, AppError> {
        let credentials = match validate_login(raw) {
            Ok(credentials) => credentials,
            Err(errors) => {
                record_attempt("validation_error");
                tracing::debug!(
                    client_ip = %client_ip,
                    field = ?errors.first_field(),
                    error_count = errors.len(),
                    "Login validation failed"
                );
                return Err(errors.into());
            }
        };

        let outcome = self.verifier.authenticate(&credentials).await;
        record_attempt(outcome.label());

        match outcome {
            AuthOutcome::Success { user } => {
                tracing::info!(
                    user_id = %user.id,
                    email = %credentials.email(),
                    client_ip = %client_ip,
                    remember_me = credentials.remember_me(),
                    "Login succeeded"
                );
                Ok(LoginSuccessResponse::new(user))
            }
            AuthOutcome::Locked => {
                tracing::warn!(
                    email = %credentials.email(),
                    client_ip = %client_ip,
                    "Login rejected: account locked"
                );
                Err(AppError::AccountLocked)
            }
            AuthOutcome::InvalidCredentials => {
                tracing::info!(
                    email = %credentials.email(),
                    client_ip = %client_ip,
                    "Login rejected: invalid credentials"
                );
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::mock()
    }
}

fn record_attempt(outcome: &'static str) {
    metrics::counter!("login_attempts_total", "outcome" => outcome).increment(1);
}
