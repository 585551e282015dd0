//! # Infrastructure Common
//!
//! 这个 crate 提供了 Ding 定义加载层的公共错误类型。
//!
//! ## 核心类型
//!
//! - [`ConfigError`] - 配置文档加载错误（文件缺失、解析失败、循环导入）
//! - [`DefinitionError`] - bean 定义装配错误（作用域、切面类型、必需属性）
//! - [`InfrastructureError`] - 对外统一的错误类型

pub mod errors;

pub use errors::*;
