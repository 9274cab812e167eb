//! 配置系统
//! 从环境变量加载所有配置（前缀 HRMS_）

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
    /// 请求体大小上限（字节）
    pub body_limit_bytes: usize,
    /// 允许跨域访问的来源（登录页面所在域），未设置时不返回 CORS 头
    pub cors_allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("server.body_limit_bytes", 16 * 1024)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // 例如 HRMS_SERVER__CORS_ALLOWED_ORIGINS=http://localhost:3001,https://hr.example.com
            .add_source(
                Environment::with_prefix("HRMS")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_allowed_origins")
                    .try_parsing(true),
            );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        if self.server.graceful_shutdown_timeout_secs > 300 {
            return Err(ConfigError::Message(
                "graceful_shutdown_timeout_secs must be <= 300".to_string(),
            ));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::Message("body_limit_bytes must be > 0".to_string()));
        }

        if let Some(origins) = &self.server.cors_allowed_origins {
            for origin in origins {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(ConfigError::Message(format!(
                        "Invalid CORS origin: {}. Must start with http:// or https://",
                        origin
                    )));
                }
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "HRMS_SERVER__ADDR",
            "HRMS_SERVER__BODY_LIMIT_BYTES",
            "HRMS_SERVER__CORS_ALLOWED_ORIGINS",
            "HRMS_LOGGING__LEVEL",
            "HRMS_LOGGING__FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.addr, "0.0.0.0:3000");
        assert_eq!(config.server.body_limit_bytes, 16 * 1024);
        assert!(config.server.cors_allowed_origins.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    #[serial]
    fn test_config_cors_origins_from_list() {
        clear_env();
        std::env::set_var(
            "HRMS_SERVER__CORS_ALLOWED_ORIGINS",
            "http://localhost:3001,https://hr.example.com",
        );

        let config = AppConfig::from_env().unwrap();
        assert_eq!(
            config.server.cors_allowed_origins,
            Some(vec![
                "http://localhost:3001".to_string(),
                "https://hr.example.com".to_string()
            ])
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_port() {
        clear_env();
        std::env::set_var("HRMS_SERVER__ADDR", "0.0.0.0:80");

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        clear_env();
        std::env::set_var("HRMS_LOGGING__LEVEL", "invalid");

        assert!(AppConfig::from_env().is_err());

        clear_env();
    }
}
