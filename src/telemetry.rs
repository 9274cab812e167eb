//! 日志与追踪系统
//!
//! `RUST_LOG` 优先于配置中的日志级别；未设置时只放行本服务和
//! 配置级别，依赖库（hyper、tower_http）压到 warn。

use crate::config::LoggingConfig;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    util::TryInitError, EnvFilter, Layer,
};

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 单行 JSON，span 关闭时输出耗时
    Json,
    /// 多行可读格式，本地开发用
    Pretty,
}

impl LogFormat {
    /// 未知取值按 JSON 处理，配置校验已经拦截了非法值
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("pretty") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,tower_http=warn")))
}

fn log_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(false)
            .boxed(),
    }
}

/// 安装全局 subscriber
///
/// 进程内只能成功一次，重复调用返回 [`TryInitError`]。
pub fn init_telemetry(logging: &LoggingConfig) -> Result<(), TryInitError> {
    let format = LogFormat::from_config(&logging.format);

    tracing_subscriber::registry()
        .with(build_env_filter(&logging.level))
        .with(log_layer(format))
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %logging.level,
        format = ?format,
        "Telemetry initialized"
    );
    Ok(())
}
