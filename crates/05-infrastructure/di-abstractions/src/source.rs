//! 定义源抽象接口
//!
//! 容器在定义缓存未命中时依次询问各个定义源。某个定义源找不到
//! 请求的 bean 并不是错误，只有全部定义源都找不到时才报告
//! [`DefinitionError::BeanNotFound`]。

use crate::definition::BeanDefinition;
use infrastructure_common::{DefinitionError, InfrastructureResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 定义源 trait
pub trait DefinitionSource: Send + Sync {
    /// 定义源名称
    fn name(&self) -> &str;

    /// 查找 bean 定义，找不到时返回 `Ok(None)`
    fn find_definition(&self, bean_name: &str) -> InfrastructureResult<Option<BeanDefinition>>;
}

/// 定义源链
///
/// 按添加顺序询问定义源，第一个给出定义的定义源胜出。
#[derive(Clone, Default)]
pub struct DefinitionSourceChain {
    sources: Vec<Arc<dyn DefinitionSource>>,
}

impl DefinitionSourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加定义源
    pub fn with_source(mut self, source: Arc<dyn DefinitionSource>) -> Self {
        self.push(source);
        self
    }

    pub fn push(&mut self, source: Arc<dyn DefinitionSource>) {
        debug!("添加定义源: {}", source.name());
        self.sources.push(source);
    }

    /// 查找 bean 定义
    pub fn lookup(&self, bean_name: &str) -> InfrastructureResult<Option<BeanDefinition>> {
        for source in &self.sources {
            if let Some(definition) = source.find_definition(bean_name)? {
                debug!("定义源 {} 提供了 bean {}", source.name(), bean_name);
                return Ok(Some(definition));
            }
        }
        Ok(None)
    }

    /// 查找 bean 定义，所有定义源都找不到时返回错误
    pub fn require(&self, bean_name: &str) -> InfrastructureResult<BeanDefinition> {
        self.lookup(bean_name)?
            .ok_or_else(|| DefinitionError::bean_not_found(bean_name).into())
    }

    pub fn contains(&self, bean_name: &str) -> InfrastructureResult<bool> {
        Ok(self.lookup(bean_name)?.is_some())
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for DefinitionSourceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionSourceChain")
            .field("sources", &self.source_names())
            .finish()
    }
}

/// 内存定义源
///
/// 在代码中直接注册的定义，可以放在文档定义源之前覆盖它们。
#[derive(Debug, Default)]
pub struct InMemoryDefinitionSource {
    definitions: RwLock<HashMap<String, BeanDefinition>>,
}

impl InMemoryDefinitionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册定义，返回被替换的旧定义
    pub fn register(&self, definition: BeanDefinition) -> Option<BeanDefinition> {
        debug!("注册内存定义: {}", definition.name);
        self.definitions
            .write()
            .insert(definition.name.clone(), definition)
    }

    pub fn remove(&self, bean_name: &str) -> Option<BeanDefinition> {
        self.definitions.write().remove(bean_name)
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

impl DefinitionSource for InMemoryDefinitionSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn find_definition(&self, bean_name: &str) -> InfrastructureResult<Option<BeanDefinition>> {
        Ok(self.definitions.read().get(bean_name).cloned())
    }
}
