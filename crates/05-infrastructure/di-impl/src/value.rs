//! 值节点提取
//!
//! `<property>`、`<constructor-arg>` 与数组 `<entry>` 共用同一套规则。
//! 规则按固定优先级排列，第一个出现的标记决定值种类，之后的标记被忽略：
//!
//! 1. `<ref bean="..."/>`
//! 2. `<null/>`、`<false/>`、`<true/>`
//! 3. 内联 `<bean>`
//! 4. `<array>`
//! 5. `<eval>`
//! 6. 其余情况取 `<value>` 子元素或节点自身的文本

use crate::document::XmlElement;
use crate::naming::AnonymousBeanNames;
use di_abstractions::{
    ArrayValue, ConstructorArgumentDefinition, PropertyDefinition, ValueDefinition,
};
use infrastructure_common::{DefinitionError, DefinitionResult};
use std::collections::HashSet;
use tracing::debug;

type BuildValue = fn(&ValueExtractor<'_>, &mut XmlElement) -> DefinitionResult<ValueDefinition>;

/// 值规则：标记元素名与对应的构造函数
struct ValueRule {
    marker: &'static str,
    build: BuildValue,
}

const VALUE_RULES: &[ValueRule] = &[
    ValueRule { marker: "ref", build: |extractor, node| extractor.bean_reference(node) },
    ValueRule { marker: "null", build: |_, _| Ok(ValueDefinition::null()) },
    ValueRule { marker: "false", build: |_, _| Ok(ValueDefinition::boolean(false)) },
    ValueRule { marker: "true", build: |_, _| Ok(ValueDefinition::boolean(true)) },
    ValueRule { marker: "bean", build: |extractor, node| extractor.inline_bean(node) },
    ValueRule { marker: "array", build: |extractor, node| extractor.array(node) },
    ValueRule { marker: "eval", build: |_, node| Ok(ValueExtractor::code(node)) },
];

/// 值提取器
pub struct ValueExtractor<'a> {
    bean: &'a str,
    names: &'a AnonymousBeanNames,
    /// 文档中已声明的 id，生成标识时避开
    reserved: Option<&'a HashSet<String>>,
}

impl<'a> ValueExtractor<'a> {
    /// `bean` 是正在装配的 bean 标识，只用于错误信息
    pub fn new(bean: &'a str, names: &'a AnonymousBeanNames) -> Self {
        Self {
            bean,
            names,
            reserved: None,
        }
    }

    /// 生成标识时避开这些已声明的 id
    pub fn reserving(mut self, ids: &'a HashSet<String>) -> Self {
        self.reserved = Some(ids);
        self
    }

    /// 提取值节点
    ///
    /// 内联 bean 没有 id 时会把生成的标识写回节点。
    pub fn extract(&self, node: &mut XmlElement) -> DefinitionResult<ValueDefinition> {
        match VALUE_RULES.iter().find(|rule| node.has_child(rule.marker)) {
            Some(rule) => (rule.build)(self, node),
            None => Ok(Self::plain_value(node)),
        }
    }

    /// 提取 `<property name="...">`
    pub fn extract_property(&self, node: &mut XmlElement) -> DefinitionResult<PropertyDefinition> {
        let name = self.required_attribute(node, "name")?;
        let value = self.extract(node)?;
        Ok(PropertyDefinition::new(name, value))
    }

    /// 提取 `<constructor-arg>`
    pub fn extract_argument(
        &self,
        node: &mut XmlElement,
    ) -> DefinitionResult<ConstructorArgumentDefinition> {
        Ok(ConstructorArgumentDefinition::new(self.extract(node)?))
    }

    fn bean_reference(&self, node: &mut XmlElement) -> DefinitionResult<ValueDefinition> {
        match node.child("ref") {
            Some(reference) => Ok(ValueDefinition::BeanRef(self.required_attribute(reference, "bean")?)),
            None => Ok(Self::plain_value(node)),
        }
    }

    fn inline_bean(&self, node: &mut XmlElement) -> DefinitionResult<ValueDefinition> {
        let Some(bean) = node.child_mut("bean") else {
            return Ok(Self::plain_value(node));
        };
        let name = match bean.attribute("id").map(str::to_string) {
            Some(id) => id,
            None => {
                let name = match self.reserved {
                    Some(taken) => self.names.next_name_excluding(taken),
                    None => self.names.next_name(),
                };
                debug!("为 {} 中的内联 bean 生成标识: {}", self.bean, name);
                bean.set_attribute("id", name.clone());
                name
            }
        };
        Ok(ValueDefinition::BeanRef(name))
    }

    fn array(&self, node: &mut XmlElement) -> DefinitionResult<ValueDefinition> {
        let mut array = ArrayValue::new();
        if let Some(container) = node.child_mut("array") {
            for entry in container.children_mut().iter_mut().filter(|e| e.name() == "entry") {
                let key = self.required_attribute(entry, "key")?;
                let value = self.extract(entry)?;
                array.insert(key, value);
            }
        }
        Ok(ValueDefinition::Array(array))
    }

    fn code(node: &XmlElement) -> ValueDefinition {
        let expression = node.child("eval").map(XmlElement::text).unwrap_or_default();
        ValueDefinition::code(expression)
    }

    fn plain_value(node: &XmlElement) -> ValueDefinition {
        let text = node.child("value").map_or_else(|| node.text(), XmlElement::text);
        ValueDefinition::string(text)
    }

    fn required_attribute(&self, node: &XmlElement, attribute: &str) -> DefinitionResult<String> {
        node.attribute(attribute)
            .map(str::to_string)
            .ok_or_else(|| DefinitionError::missing_attribute(self.bean, node.name(), attribute))
    }
}
