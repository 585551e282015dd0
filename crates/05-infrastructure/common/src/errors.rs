//! 错误类型定义

use thiserror::Error;

/// 配置文档加载错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {path}, 原因: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {path}: {}", .diagnostics.join("; "))]
    ParseError {
        path: String,
        diagnostics: Vec<String>,
    },

    #[error("导入声明缺少 resource 属性: {path}")]
    InvalidImport { path: String },

    #[error("检测到循环导入: {chain}")]
    CyclicImport { chain: String },

    #[error("配置选项无效: {message}")]
    InvalidOptions { message: String },
}

impl ConfigError {
    /// 创建单条诊断信息的解析错误
    pub fn parse_error(path: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            diagnostics: vec![diagnostic.into()],
        }
    }

    /// 创建配置选项错误
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

/// Bean 定义装配错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("无效的 bean 作用域: {scope} (bean: {bean})")]
    InvalidScope { bean: String, scope: String },

    #[error("无效的切面类型: {aspect_type} (bean: {bean})")]
    InvalidAspectType { bean: String, aspect_type: String },

    #[error("缺少必需属性: <{element}> 的 {attribute} (bean: {bean})")]
    MissingAttribute {
        bean: String,
        element: String,
        attribute: String,
    },

    #[error("缺少必需元素: <{element}> (bean: {bean})")]
    MissingElement { bean: String, element: String },

    #[error("bean 定义不存在: {bean}")]
    BeanNotFound { bean: String },
}

impl DefinitionError {
    /// 创建缺少属性错误
    pub fn missing_attribute(
        bean: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::MissingAttribute {
            bean: bean.into(),
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// 创建 bean 不存在错误
    pub fn bean_not_found(bean: impl Into<String>) -> Self {
        Self::BeanNotFound { bean: bean.into() }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("定义错误: {source}")]
    DefinitionError {
        #[from]
        source: DefinitionError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

impl InfrastructureError {
    /// 是否为 bean 不存在错误
    pub fn is_bean_not_found(&self) -> bool {
        matches!(
            self,
            Self::DefinitionError {
                source: DefinitionError::BeanNotFound { .. }
            }
        )
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DefinitionResult<T> = Result<T, DefinitionError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
