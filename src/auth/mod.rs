//! Authentication module
//! 登录输入校验与凭据验证

pub mod mock;
pub mod validation;
pub mod verifier;

pub use mock::MockAuthenticator;
pub use validation::{validate_login, FieldError, LoginField, ValidationErrors};
pub use verifier::CredentialVerifier;
