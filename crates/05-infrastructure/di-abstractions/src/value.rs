//! 属性与构造参数的值定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 值种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// 引用另一个 bean
    BeanRef,
    /// 字面量
    Simple,
    /// 嵌套数组
    Array,
    /// 延迟求值的代码表达式
    Code,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BeanRef => "BEAN_REF",
            Self::Simple => "SIMPLE",
            Self::Array => "ARRAY",
            Self::Code => "CODE",
        };
        f.write_str(name)
    }
}

/// 字面量值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimpleValue {
    Null,
    Bool(bool),
    String(String),
}

impl SimpleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

/// 数组值
///
/// 保持插入顺序；重复的键覆盖原有值但保留原位置。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayValue {
    entries: Vec<(String, ValueDefinition)>,
}

impl ArrayValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入条目，返回被覆盖的旧值
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: ValueDefinition,
    ) -> Option<ValueDefinition> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ValueDefinition> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueDefinition)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 值定义
///
/// 每个值节点恰好对应一种 [`ValueKind`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueDefinition {
    BeanRef(String),
    Simple(SimpleValue),
    Array(ArrayValue),
    Code(String),
}

impl ValueDefinition {
    pub fn bean_ref(bean: impl Into<String>) -> Self {
        Self::BeanRef(bean.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Simple(SimpleValue::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::Simple(SimpleValue::Bool(value))
    }

    pub fn null() -> Self {
        Self::Simple(SimpleValue::Null)
    }

    pub fn code(expression: impl Into<String>) -> Self {
        Self::Code(expression.into())
    }

    /// 值种类
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::BeanRef(_) => ValueKind::BeanRef,
            Self::Simple(_) => ValueKind::Simple,
            Self::Array(_) => ValueKind::Array,
            Self::Code(_) => ValueKind::Code,
        }
    }

    /// 被引用的 bean 标识
    pub fn referenced_bean(&self) -> Option<&str> {
        match self {
            Self::BeanRef(bean) => Some(bean),
            _ => None,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleValue> {
        match self {
            Self::Simple(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            Self::Code(expression) => Some(expression),
            _ => None,
        }
    }
}

/// 属性定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// 属性名
    pub name: String,
    /// 属性值
    pub value: ValueDefinition,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, value: ValueDefinition) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

/// 构造参数定义
///
/// 与属性定义结构相同，只是没有名称，由位置决定含义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorArgumentDefinition {
    pub value: ValueDefinition,
}

impl ConstructorArgumentDefinition {
    pub fn new(value: ValueDefinition) -> Self {
        Self { value }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}
