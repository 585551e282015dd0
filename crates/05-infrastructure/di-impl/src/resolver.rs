//! 配置文档解析器
//!
//! 加载根文档，并递归合并 `<import resource="..."/>` 引用的文档。
//! 同一文件在一次解析中只加载一次；导入形成环时报告
//! [`ConfigError::CyclicImport`]。

use crate::document::{XmlDocument, XmlElement};
use crate::options::ImportBase;
use infrastructure_common::{ConfigError, ConfigResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 已解析的文档集合
///
/// 以规范化后的文件路径为键，保持解析顺序：根文档在前，导入文档按
/// 深度优先顺序排在后面。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentSet {
    documents: Vec<XmlDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入文档，路径已存在时保留先加入的文档
    pub fn insert(&mut self, document: XmlDocument) -> bool {
        if self.contains(document.path()) {
            return false;
        }
        self.documents.push(document);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    pub fn get(&self, path: &Path) -> Option<&XmlDocument> {
        self.documents.iter().find(|d| d.path() == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &XmlDocument> {
        self.documents.iter()
    }

    pub fn document_ids(&self) -> Vec<&Path> {
        self.documents.iter().map(XmlDocument::path).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// 按解析顺序查找 bean 声明，第一个包含该 id 的文档胜出
    pub fn find_bean(&self, id: &str) -> Option<(&Path, &XmlElement)> {
        self.documents
            .iter()
            .find_map(|d| d.find_bean(id).map(|bean| (d.path(), bean)))
    }

    /// 全部文档中声明过的 bean id
    pub fn declared_bean_ids(&self) -> HashSet<String> {
        self.documents
            .iter()
            .flat_map(XmlDocument::bean_ids)
            .map(str::to_string)
            .collect()
    }

    pub fn find_bean_mut(&mut self, id: &str) -> Option<(&Path, &mut XmlElement)> {
        self.documents
            .iter_mut()
            .find_map(|d| d.find_bean_entry_mut(id))
    }
}

/// 文档解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentResolver {
    import_base: ImportBase,
}

impl DocumentResolver {
    pub fn new(import_base: ImportBase) -> Self {
        Self { import_base }
    }

    /// 解析根文档及其全部导入
    pub fn resolve(&self, root: impl AsRef<Path>) -> ConfigResult<DocumentSet> {
        let root = root.as_ref();
        info!("解析配置文档: {}", root.display());

        let mut documents = DocumentSet::new();
        let mut chain = Vec::new();
        self.resolve_into(root, &mut chain, &mut documents)?;

        info!("配置文档解析完成，共 {} 个文档", documents.len());
        Ok(documents)
    }

    fn resolve_into(
        &self,
        path: &Path,
        chain: &mut Vec<PathBuf>,
        documents: &mut DocumentSet,
    ) -> ConfigResult<()> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let canonical = path.canonicalize().map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        if chain.contains(&canonical) {
            let cycle = chain
                .iter()
                .chain(std::iter::once(&canonical))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ConfigError::CyclicImport { chain: cycle });
        }
        if documents.contains(&canonical) {
            debug!("跳过重复导入: {}", canonical.display());
            return Ok(());
        }

        let document = XmlDocument::load(&canonical)?;
        let imports = document.imports()?;
        documents.insert(document);

        chain.push(canonical.clone());
        for resource in imports {
            let target = self.import_path(&canonical, &resource);
            debug!("{} 导入 {}", canonical.display(), target.display());
            self.resolve_into(&target, chain, documents)?;
        }
        chain.pop();

        Ok(())
    }

    fn import_path(&self, importer: &Path, resource: &str) -> PathBuf {
        let resource = Path::new(resource);
        if resource.is_absolute() {
            return resource.to_path_buf();
        }
        match self.import_base {
            ImportBase::Document => importer
                .parent()
                .map_or_else(|| resource.to_path_buf(), |dir| dir.join(resource)),
            ImportBase::WorkingDirectory => resource.to_path_buf(),
        }
    }
}
