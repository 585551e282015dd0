//! Bean 定义模型
//!
//! 描述一个已声明组件的全部元数据：实现类、作用域、生命周期钩子、
//! 依赖关系、属性、构造参数以及切面。定义层只记录这些信息，
//! 实例的创建与销毁由下游容器负责。

use crate::aspect::AspectDefinition;
use crate::value::{ConstructorArgumentDefinition, PropertyDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bean 作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeanScope {
    /// 单例模式 - 容器内共享同一个实例
    #[default]
    Singleton,
    /// 原型模式 - 每次请求都创建新实例
    Prototype,
}

impl BeanScope {
    /// 从配置属性值解析作用域，未知值返回 `None`
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "singleton" => Some(Self::Singleton),
            "prototype" => Some(Self::Prototype),
            _ => None,
        }
    }

    /// 配置文档中使用的属性值
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }
}

impl fmt::Display for BeanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bean 定义
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeanDefinition {
    /// bean 标识
    pub name: String,
    /// 实现类名
    pub class: String,
    /// 作用域
    pub scope: BeanScope,
    /// 工厂方法
    pub factory_method: Option<String>,
    /// 工厂 bean 标识
    pub factory_bean: Option<String>,
    /// 初始化方法
    pub init_method: Option<String>,
    /// 销毁方法
    pub destroy_method: Option<String>,
    /// 依赖的 bean 标识（有序）
    pub depends_on: Vec<String>,
    /// 属性定义（按声明顺序）
    pub properties: Vec<PropertyDefinition>,
    /// 构造参数定义（按位置）
    pub arguments: Vec<ConstructorArgumentDefinition>,
    /// 切面定义（按声明顺序）
    pub aspects: Vec<AspectDefinition>,
}

impl BeanDefinition {
    /// 创建空的 bean 定义
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 设置实现类
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: BeanScope) -> Self {
        self.scope = scope;
        self
    }

    /// 添加属性
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// 添加构造参数
    pub fn with_argument(mut self, argument: ConstructorArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// 添加切面
    pub fn with_aspect(mut self, aspect: AspectDefinition) -> Self {
        self.aspects.push(aspect);
        self
    }

    pub fn is_singleton(&self) -> bool {
        self.scope == BeanScope::Singleton
    }

    /// 是否由其他 bean 的工厂方法产生
    pub fn has_factory_bean(&self) -> bool {
        self.factory_bean.is_some()
    }

    /// 按名称查找属性
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }
}
