//! 登录输入校验
//!
//! 对未经类型化的请求体逐字段校验，每个字段只保留第一条错误，
//! 错误按字段声明顺序（email、password、rememberMe）排列。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::models::auth::LoginCredentials;

pub const EMAIL_MIN_LENGTH: usize = 3;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

pub const EMAIL_REQUIRED_MESSAGE: &str = "メールアドレスを入力してください";
pub const EMAIL_NOT_STRING_MESSAGE: &str = "メールアドレスは文字列で入力してください";
pub const EMAIL_FORMAT_MESSAGE: &str = "有効なメールアドレスを入力してください";
pub const EMAIL_TOO_SHORT_MESSAGE: &str = "メールアドレスは3文字以上である必要があります";
pub const EMAIL_TOO_LONG_MESSAGE: &str = "メールアドレスは255文字以内である必要があります";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "パスワードを入力してください";
pub const PASSWORD_NOT_STRING_MESSAGE: &str = "パスワードは文字列で入力してください";
pub const PASSWORD_TOO_SHORT_MESSAGE: &str = "パスワードは8文字以上である必要があります";
pub const PASSWORD_TOO_LONG_MESSAGE: &str = "パスワードは128文字以内である必要があります";
pub const REMEMBER_ME_NOT_BOOLEAN_MESSAGE: &str = "ログイン状態の保持は真偽値で指定してください";

// 本地部分不限制 64 字符，长度由单独的规则检查
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

/// 登录表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginField {
    Email,
    Password,
    RememberMe,
}

impl LoginField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
            LoginField::RememberMe => "rememberMe",
        }
    }
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: LoginField,
    pub message: String,
}

/// 有序的字段错误列表，每个字段至多一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// 空列表只在 crate 内部作为累积起点或表单初始值使用
    pub(crate) fn empty() -> Self {
        Self(Vec::new())
    }

    fn push(&mut self, field: LoginField, message: &str) {
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// 第一条错误，决定 HTTP 响应消息和表单焦点
    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn first_field(&self) -> Option<LoginField> {
        self.first().map(|e| e.field)
    }

    pub fn get(&self, field: LoginField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// 校验原始登录请求体
///
/// 非对象的 JSON 值视为没有任何字段。
pub fn validate_login(raw: &Value) -> Result<LoginCredentials, ValidationErrors> {
    let email = validate_email(raw.get("email"));
    let password = validate_password(raw.get("password"));
    let remember_me = validate_remember_me(raw.get("rememberMe"));

    match (email, password, remember_me) {
        (Ok(email), Ok(password), Ok(remember_me)) => {
            Ok(LoginCredentials::new(email, password, remember_me))
        }
        (email, password, remember_me) => {
            let mut errors = ValidationErrors::empty();
            if let Err(message) = email {
                errors.push(LoginField::Email, message);
            }
            if let Err(message) = password {
                errors.push(LoginField::Password, message);
            }
            if let Err(message) = remember_me {
                errors.push(LoginField::RememberMe, message);
            }
            Err(errors)
        }
    }
}

fn validate_email(value: Option<&Value>) -> Result<String, &'static str> {
    let email = match value {
        None => return Err(EMAIL_REQUIRED_MESSAGE),
        Some(Value::String(s)) => s,
        Some(_) => return Err(EMAIL_NOT_STRING_MESSAGE),
    };

    // 格式优先于长度
    if !is_valid_email(email) {
        return Err(EMAIL_FORMAT_MESSAGE);
    }

    let length = email.chars().count();
    if length < EMAIL_MIN_LENGTH {
        return Err(EMAIL_TOO_SHORT_MESSAGE);
    }
    if length > EMAIL_MAX_LENGTH {
        return Err(EMAIL_TOO_LONG_MESSAGE);
    }

    Ok(email.clone())
}

fn validate_password(value: Option<&Value>) -> Result<String, &'static str> {
    let password = match value {
        None => return Err(PASSWORD_REQUIRED_MESSAGE),
        Some(Value::String(s)) => s,
        Some(_) => return Err(PASSWORD_NOT_STRING_MESSAGE),
    };

    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(PASSWORD_TOO_SHORT_MESSAGE);
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(PASSWORD_TOO_LONG_MESSAGE);
    }

    Ok(password.clone())
}

fn validate_remember_me(value: Option<&Value>) -> Result<bool, &'static str> {
    match value {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        // null、"true"、1 等一律拒绝，不做真值转换
        Some(_) => Err(REMEMBER_ME_NOT_BOOLEAN_MESSAGE),
    }
}

fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.co.jp"));

        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("invalidemail.com"));
        assert!(!is_valid_email("ab"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("us..er@example.com"));
        assert!(!is_valid_email("user.@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@example.c"));
    }

    #[test]
    fn test_one_error_per_field_in_declaration_order() {
        let errors = validate_login(&json!({
            "email": 42,
            "password": "short",
            "rememberMe": "yes"
        }))
        .unwrap_err();

        let fields: Vec<LoginField> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![LoginField::Email, LoginField::Password, LoginField::RememberMe]
        );
        assert_eq!(errors.get(LoginField::Email), Some(EMAIL_NOT_STRING_MESSAGE));
    }

    #[test]
    fn test_push_keeps_first_message() {
        let mut errors = ValidationErrors::empty();
        errors.push(LoginField::Password, PASSWORD_TOO_SHORT_MESSAGE);
        errors.push(LoginField::Password, PASSWORD_TOO_LONG_MESSAGE);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(LoginField::Password), Some(PASSWORD_TOO_SHORT_MESSAGE));
    }

    #[test]
    fn test_display_lists_fields() {
        let errors = validate_login(&json!({})).unwrap_err();
        let text = errors.to_string();
        assert!(text.starts_with("email: "));
        assert!(text.contains("; password: "));
    }
}
