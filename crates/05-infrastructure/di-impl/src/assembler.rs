//! Bean 定义装配器
//!
//! 在已解析的文档集合中查找 `<bean id="...">` 声明，并把它的属性与
//! 子元素装配成 [`BeanDefinition`]。

use crate::aspect::extract_aspect;
use crate::document::XmlElement;
use crate::naming::AnonymousBeanNames;
use crate::resolver::DocumentSet;
use crate::value::ValueExtractor;
use di_abstractions::{BeanDefinition, BeanScope};
use infrastructure_common::{DefinitionError, DefinitionResult};
use std::collections::HashSet;
use tracing::debug;

/// Bean 定义装配器
pub struct BeanAssembler<'a> {
    names: &'a AnonymousBeanNames,
}

impl<'a> BeanAssembler<'a> {
    pub fn new(names: &'a AnonymousBeanNames) -> Self {
        Self { names }
    }

    /// 装配 bean 定义
    ///
    /// 找不到声明时原样返回 `existing`，调用方可以继续询问其他定义源。
    /// 找到声明时在 `existing`（没有则新建）的基础上填充定义。
    pub fn assemble(
        &self,
        bean_name: &str,
        documents: &mut DocumentSet,
        existing: Option<BeanDefinition>,
    ) -> DefinitionResult<Option<BeanDefinition>> {
        let reserved = documents.declared_bean_ids();
        let Some((path, element)) = documents.find_bean_mut(bean_name) else {
            debug!("未找到 bean 声明: {}", bean_name);
            return Ok(existing);
        };
        debug!("在 {} 中找到 bean {}", path.display(), bean_name);

        let mut bean = existing.unwrap_or_else(|| BeanDefinition::new(bean_name));
        bean.name = bean_name.to_string();

        // 在副本上装配，全部成功后才把生成的标识写回文档
        let mut declaration = element.clone();
        self.apply_attributes(&mut bean, &declaration)?;
        self.apply_children(&mut bean, &mut declaration, &reserved)?;
        *element = declaration;
        Ok(Some(bean))
    }

    fn apply_attributes(&self, bean: &mut BeanDefinition, element: &XmlElement) -> DefinitionResult<()> {
        bean.class = element
            .attribute("class")
            .ok_or_else(|| DefinitionError::missing_attribute(&bean.name, "bean", "class"))?
            .to_string();

        let scope = element
            .attribute("scope")
            .ok_or_else(|| DefinitionError::missing_attribute(&bean.name, "bean", "scope"))?;
        bean.scope = BeanScope::from_attribute(scope).ok_or_else(|| DefinitionError::InvalidScope {
            bean: bean.name.clone(),
            scope: scope.to_string(),
        })?;

        if let Some(factory_method) = element.attribute("factory-method") {
            bean.factory_method = Some(factory_method.to_string());
        }
        if let Some(factory_bean) = element.attribute("factory-bean") {
            bean.factory_bean = Some(factory_bean.to_string());
        }
        if let Some(depends_on) = element.attribute("depends-on") {
            bean.depends_on = depends_on
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(init_method) = element.attribute("init-method") {
            bean.init_method = Some(init_method.to_string());
        }
        if let Some(destroy_method) = element.attribute("destroy-method") {
            bean.destroy_method = Some(destroy_method.to_string());
        }
        Ok(())
    }

    fn apply_children(
        &self,
        bean: &mut BeanDefinition,
        element: &mut XmlElement,
        reserved: &HashSet<String>,
    ) -> DefinitionResult<()> {
        let extractor = ValueExtractor::new(&bean.name, self.names).reserving(reserved);
        let mut properties = Vec::new();
        let mut arguments = Vec::new();
        let mut aspects = Vec::new();

        for child in element.children_mut() {
            match BeanChild::of(child) {
                Some(BeanChild::Property) => properties.push(extractor.extract_property(child)?),
                Some(BeanChild::Argument) => arguments.push(extractor.extract_argument(child)?),
                Some(BeanChild::Aspect) => aspects.push(extract_aspect(&bean.name, child)?),
                None => {}
            }
        }

        if !properties.is_empty() {
            bean.properties = properties;
        }
        if !arguments.is_empty() {
            bean.arguments = arguments;
        }
        if !aspects.is_empty() {
            bean.aspects = aspects;
        }
        Ok(())
    }
}

/// `<bean>` 下参与装配的子元素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BeanChild {
    Property,
    Argument,
    Aspect,
}

impl BeanChild {
    fn of(element: &XmlElement) -> Option<Self> {
        match element.name() {
            "property" => Some(Self::Property),
            "constructor-arg" => Some(Self::Argument),
            "aspect" => Some(Self::Aspect),
            _ => None,
        }
    }
}
