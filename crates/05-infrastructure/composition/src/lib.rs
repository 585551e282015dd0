//! # 基础设施组合层
//!
//! 把各个定义源组合成一条查找链，供容器在定义缓存未命中时调用。
//!
//! ## 主要功能
//!
//! - **定义源构建器**: 使用构建者模式组装 XML 文档和代码注册的定义源
//! - **组合配置**: 从 TOML 文件读取文档列表和日志配置
//! - **日志初始化**: 开发与生产环境的日志预设
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{DefinitionSourceBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chain = DefinitionSourceBuilder::new()
//!         .with_logging(LoggingConfig::development())
//!         .add_xml_file("config/beans.xml")?
//!         .build()?;
//!
//!     let definition = chain.require("userService")?;
//!     println!("{} -> {}", definition.name, definition.class);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod logging;

// 重新导出主要类型
pub use builder::DefinitionSourceBuilder;
pub use config::CompositionConfig;
pub use logging::{initialize_logging, LoggingConfig};

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
