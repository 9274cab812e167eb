//! 数据模型模块
//! 登录请求/响应模型与登录表单状态

pub mod auth;
pub mod login_form;
