//! 人事系统登录服务库
//! 提供登录校验、模拟认证与 HTTP 层

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod telemetry;
