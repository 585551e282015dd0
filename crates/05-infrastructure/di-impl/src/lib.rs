//! # 依赖注入定义驱动
//!
//! 从 XML 配置文档加载 bean 定义，产出 `di-abstractions` 中的定义模型。
//!
//! ## 主要组件
//!
//! - [`DocumentResolver`] - 解析根文档并递归合并导入的文档
//! - [`ValueExtractor`] - 把属性、构造参数、数组条目转换为值定义
//! - [`extract_aspect`] - 把 `<aspect>` 节点转换为切面定义
//! - [`BeanAssembler`] - 在文档集合中查找并装配 bean 定义
//! - [`XmlDefinitionDriver`] - 供容器调用的定义源入口
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_impl::XmlDefinitionDriver;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = XmlDefinitionDriver::from_path("config/beans.xml");
//!     if let Some(definition) = driver.lookup("userService", None)? {
//!         println!("{} -> {}", definition.name, definition.class);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aspect;
pub mod assembler;
pub mod document;
pub mod driver;
pub mod naming;
pub mod options;
pub mod resolver;
pub mod value;

pub use aspect::extract_aspect;
pub use assembler::BeanAssembler;
pub use document::{XmlDocument, XmlElement};
pub use driver::XmlDefinitionDriver;
pub use naming::AnonymousBeanNames;
pub use options::{ImportBase, XmlDriverOptions};
pub use resolver::{DocumentResolver, DocumentSet};
pub use value::ValueExtractor;
