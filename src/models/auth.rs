//! Authentication-related models

use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize, Serializer};

/// 登录成功提示
pub const LOGIN_SUCCEEDED_MESSAGE: &str = "ログインに成功しました";
/// 认证失败提示（不区分账号是否存在）
pub const INVALID_CREDENTIALS_MESSAGE: &str = "メールアドレスまたはパスワードが正しくありません";
/// 账户锁定提示
pub const ACCOUNT_LOCKED_MESSAGE: &str =
    "アカウントがロックされています。サポートにお問い合わせください。";
/// 限流提示
pub const RATE_LIMITED_MESSAGE: &str =
    "リクエストが多すぎます。しばらくしてから再度お試しください。";
/// 服务端错误提示
pub const SERVER_ERROR_MESSAGE: &str = "サーバーエラーが発生しました";

/// 错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidCredentials,
    AccountLocked,
    /// 预留，目前没有任何路径会产生
    RateLimitExceeded,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::AccountLocked => "ACCOUNT_LOCKED",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }
}

/// 校验通过的登录凭据
///
/// 只能由 [`crate::auth::validation::validate_login`] 构造，
/// 构造后不可修改。密码使用 Secret 包装，Debug 输出中不会出现明文。
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: String,
    password: Secret<String>,
    remember_me: bool,
}

impl LoginCredentials {
    pub(crate) fn new(email: String, password: String, remember_me: bool) -> Self {
        Self {
            email,
            password: Secret::new(password),
            remember_me,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }

    /// 目前不影响认证结果，预留给会话时长
    pub fn remember_me(&self) -> bool {
        self.remember_me
    }
}

/// 登录成功后返回的用户信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    /// 输出为毫秒精度的 UTC 时间，例如 `2024-01-02T03:04:05.123Z`
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

fn serialize_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// 认证结果
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Success { user: UserRecord },
    Locked,
    InvalidCredentials,
}

impl AuthOutcome {
    /// 用于日志与指标的标签
    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Success { .. } => "success",
            AuthOutcome::Locked => "locked",
            AuthOutcome::InvalidCredentials => "invalid_credentials",
        }
    }
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginSuccessResponse {
    pub success: bool,
    pub message: String,
    pub user: UserRecord,
}

impl LoginSuccessResponse {
    pub fn new(user: UserRecord) -> Self {
        Self {
            success: true,
            message: LOGIN_SUCCEEDED_MESSAGE.to_string(),
            user,
        }
    }
}

/// 错误响应 DTO
///
/// `code` 缺省时不输出该字段（服务端错误）
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}
