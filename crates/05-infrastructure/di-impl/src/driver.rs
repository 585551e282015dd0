//! XML 定义驱动
//!
//! 容器在定义缓存未命中时调用的入口。第一次查找时解析根文档及其导入，
//! 之后所有查找共享同一份文档集合。驱动实例由调用方持有，需要共享时
//! 放进 `Arc` 传递。同一条定义源链上的驱动应通过 [`XmlDefinitionDriver::with_names`]
//! 共享匿名 bean 标识生成器。

use crate::assembler::BeanAssembler;
use crate::naming::AnonymousBeanNames;
use crate::options::XmlDriverOptions;
use crate::resolver::{DocumentResolver, DocumentSet};
use di_abstractions::{BeanDefinition, DefinitionSource};
use infrastructure_common::{ConfigResult, InfrastructureResult};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// XML 定义驱动
#[derive(Debug)]
pub struct XmlDefinitionDriver {
    options: XmlDriverOptions,
    resolver: DocumentResolver,
    /// 解析后的文档；装配时会写回匿名 bean 标识，所以用互斥锁串行化
    documents: OnceCell<Mutex<DocumentSet>>,
    names: Arc<AnonymousBeanNames>,
}

impl XmlDefinitionDriver {
    pub fn new(options: XmlDriverOptions) -> Self {
        Self::with_names(options, Arc::new(AnonymousBeanNames::new()))
    }

    /// 使用共享的匿名 bean 标识生成器创建
    pub fn with_names(options: XmlDriverOptions, names: Arc<AnonymousBeanNames>) -> Self {
        let resolver = DocumentResolver::new(options.import_base);
        Self {
            options,
            resolver,
            documents: OnceCell::new(),
            names,
        }
    }

    /// 使用默认选项从根文档路径创建
    pub fn from_path(filename: impl AsRef<Path>) -> Self {
        Self::new(XmlDriverOptions::new(filename.as_ref()))
    }

    pub fn options(&self) -> &XmlDriverOptions {
        &self.options
    }

    /// 文档是否已经解析
    pub fn is_loaded(&self) -> bool {
        self.documents.get().is_some()
    }

    /// 当前文档集合的快照，会在需要时触发解析
    pub fn documents(&self) -> ConfigResult<DocumentSet> {
        Ok(self.load()?.lock().clone())
    }

    /// 查找 bean 定义
    ///
    /// 找到声明时返回填充后的定义（以 `existing` 为基础），
    /// 否则原样返回 `existing`。
    pub fn lookup(
        &self,
        bean_name: &str,
        existing: Option<BeanDefinition>,
    ) -> InfrastructureResult<Option<BeanDefinition>> {
        let documents = self.load()?;
        let mut documents = documents.lock();
        let definition =
            BeanAssembler::new(&self.names).assemble(bean_name, &mut documents, existing)?;
        Ok(definition)
    }

    fn load(&self) -> ConfigResult<&Mutex<DocumentSet>> {
        self.documents.get_or_try_init(|| {
            debug!("首次查找，解析 {}", self.options.filename.display());
            self.resolver.resolve(&self.options.filename).map(Mutex::new)
        })
    }
}

impl DefinitionSource for XmlDefinitionDriver {
    fn name(&self) -> &str {
        "xml"
    }

    fn find_definition(&self, bean_name: &str) -> InfrastructureResult<Option<BeanDefinition>> {
        self.lookup(bean_name, None)
    }
}
