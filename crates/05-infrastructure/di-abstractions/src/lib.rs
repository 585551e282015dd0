//! # Dependency Injection Abstractions
//!
//! 依赖注入定义模型，描述容器实例化、装配和管理 bean 所需的全部数据。
//!
//! ## 核心类型
//!
//! - [`BeanDefinition`] - bean 定义
//! - [`PropertyDefinition`] / [`ConstructorArgumentDefinition`] - 值赋值
//! - [`ValueDefinition`] - 带种类标签的值描述
//! - [`AspectDefinition`] - 切面定义
//! - [`DefinitionSource`] - 定义源接口
//! - [`DefinitionSourceChain`] - 定义源链

pub mod aspect;
pub mod definition;
pub mod source;
pub mod value;

pub use aspect::*;
pub use definition::*;
pub use source::*;
pub use value::*;
