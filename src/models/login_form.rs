//! 登录表单状态
//!
//! 登录页面的显式状态机：`Idle → Submitting → Succeeded | Failed(kind)`。
//! 校验失败直接从 `Idle` 进入 `Failed(Validation)`，不会进入提交中状态。

use serde_json::json;
use thiserror::Error;

use crate::auth::{validate_login, LoginField, ValidationErrors};
use crate::models::auth::{
    AuthOutcome, LoginCredentials, ACCOUNT_LOCKED_MESSAGE, INVALID_CREDENTIALS_MESSAGE,
    SERVER_ERROR_MESSAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    InvalidCredentials,
    Locked,
    Server,
}

impl FailureKind {
    /// 表单顶部显示的提示，字段错误单独显示
    pub fn banner_message(&self) -> Option<&'static str> {
        match self {
            FailureKind::Validation => None,
            FailureKind::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            FailureKind::Locked => Some(ACCOUNT_LOCKED_MESSAGE),
            FailureKind::Server => Some(SERVER_ERROR_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(FailureKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("no submission in flight")]
    NotSubmitting,

    #[error("validation failed: {0}")]
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    remember_me: bool,
    status: FormStatus,
    field_errors: ValidationErrors,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            remember_me: false,
            status: FormStatus::Idle,
            field_errors: ValidationErrors::empty(),
        }
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.email = email.into();
        Ok(())
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.password = password.into();
        Ok(())
    }

    pub fn set_remember_me(&mut self, remember_me: bool) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.remember_me = remember_me;
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// 提交中禁用所有输入
    pub fn is_busy(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn error_for(&self, field: LoginField) -> Option<&str> {
        self.field_errors.get(field)
    }

    /// 校验当前输入，通过后进入提交中状态并返回凭据
    pub fn submit(&mut self) -> Result<LoginCredentials, FormError> {
        self.ensure_editable()?;
        self.field_errors = ValidationErrors::empty();

        let raw = json!({
            "email": self.email,
            "password": self.password,
            "rememberMe": self.remember_me,
        });

        match validate_login(&raw) {
            Ok(credentials) => {
                self.status = FormStatus::Submitting;
                Ok(credentials)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                self.status = FormStatus::Failed(FailureKind::Validation);
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// 记录认证结果，只能在提交中调用
    pub fn complete(&mut self, outcome: &AuthOutcome) -> Result<(), FormError> {
        if !self.is_busy() {
            return Err(FormError::NotSubmitting);
        }

        self.status = match outcome {
            AuthOutcome::Success { .. } => FormStatus::Succeeded,
            AuthOutcome::Locked => FormStatus::Failed(FailureKind::Locked),
            AuthOutcome::InvalidCredentials => FormStatus::Failed(FailureKind::InvalidCredentials),
        };
        Ok(())
    }

    pub fn fail_with_server_error(&mut self) -> Result<(), FormError> {
        if !self.is_busy() {
            return Err(FormError::NotSubmitting);
        }
        self.status = FormStatus::Failed(FailureKind::Server);
        Ok(())
    }

    /// 应获得焦点的字段：email 优先于 password
    pub fn focus_target(&self) -> Option<LoginField> {
        [LoginField::Email, LoginField::Password]
            .into_iter()
            .find(|field| self.field_errors.get(*field).is_some())
    }

    /// 回到初始状态，保留已输入的内容
    pub fn reset(&mut self) {
        self.status = FormStatus::Idle;
        self.field_errors = ValidationErrors::empty();
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if self.is_busy() {
            Err(FormError::Busy)
        } else {
            Ok(())
        }
    }
}
