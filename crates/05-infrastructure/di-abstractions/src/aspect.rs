//! 切面定义
//!
//! 只描述横切规则本身，织入与拦截由下游代理引擎完成。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 切面类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    /// 环绕匹配的方法调用
    Method,
    /// 拦截匹配方法抛出的异常
    Exception,
}

impl AspectType {
    /// 从配置属性值解析切面类型，未知值返回 `None`
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "method" => Some(Self::Method),
            "exception" => Some(Self::Exception),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Exception => "exception",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 切面定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectDefinition {
    /// 切点表达式
    pub pointcut: String,
    /// 切面类型
    pub aspect_type: AspectType,
    /// 实现横切行为的 bean 标识
    pub bean: String,
}

impl AspectDefinition {
    pub fn new(pointcut: impl Into<String>, aspect_type: AspectType, bean: impl Into<String>) -> Self {
        Self {
            pointcut: pointcut.into(),
            aspect_type,
            bean: bean.into(),
        }
    }
}
