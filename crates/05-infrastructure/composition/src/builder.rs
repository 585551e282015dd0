//! 定义源构建器

use crate::config::CompositionConfig;
use crate::logging::{initialize_logging, LoggingConfig};
use di_abstractions::{DefinitionSource, DefinitionSourceChain};
use di_impl::{AnonymousBeanNames, XmlDefinitionDriver, XmlDriverOptions};
use infrastructure_common::{ConfigError, InfrastructureResult};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 定义源构建器
///
/// 使用建造者模式组装定义源链，查找时按加入顺序依次询问各个定义源。
pub struct DefinitionSourceBuilder {
    /// 定义源列表
    sources: Vec<Arc<dyn DefinitionSource>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
    /// 所有 XML 驱动共享的匿名 bean 标识生成器
    names: Arc<AnonymousBeanNames>,
}

impl DefinitionSourceBuilder {
    /// 创建新的定义源构建器
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
            names: Arc::new(AnonymousBeanNames::new()),
        }
    }

    /// 从组合配置创建
    pub fn from_config(config: CompositionConfig) -> Self {
        let mut builder = Self::new();
        if let Some(logging) = config.logging {
            builder = builder.with_logging(logging);
        }
        config
            .xml
            .into_iter()
            .fold(builder, |builder, options| builder.add_xml_driver(options))
    }

    /// 从组合配置文件创建
    pub fn from_config_file(path: impl AsRef<Path>) -> InfrastructureResult<Self> {
        let config = CompositionConfig::from_toml_file(path)?;
        Ok(Self::from_config(config))
    }

    /// 添加 XML 定义文档
    pub fn add_xml_file(self, path: impl AsRef<Path>) -> InfrastructureResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        info!("添加 XML 定义文档: {}", path.display());
        Ok(self.add_xml_driver(XmlDriverOptions::new(path)))
    }

    /// 按选项添加 XML 定义驱动，文档在第一次查找时才解析
    pub fn add_xml_driver(self, options: XmlDriverOptions) -> Self {
        debug!("添加 XML 定义驱动: {}", options.filename.display());
        let names = Arc::clone(&self.names);
        self.add_source(XmlDefinitionDriver::with_names(options, names))
    }

    /// 添加定义源
    pub fn add_source<T: DefinitionSource + 'static>(self, source: T) -> Self {
        self.add_shared_source(Arc::new(source))
    }

    /// 添加调用方仍持有引用的定义源
    pub fn add_shared_source(mut self, source: Arc<dyn DefinitionSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true;
        self
    }

    /// 只覆盖日志级别，保留已有的其他日志配置
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging_config.level = level.into();
        self.logging_enabled = true;
        self
    }

    /// 构建定义源链
    pub fn build(self) -> InfrastructureResult<DefinitionSourceChain> {
        // 只有在明确配置了日志时才初始化日志
        if self.logging_enabled {
            initialize_logging(&self.logging_config)?;
        }

        let chain = self
            .sources
            .into_iter()
            .fold(DefinitionSourceChain::new(), DefinitionSourceChain::with_source);

        info!("定义源链构建完成: {:?}", chain.source_names());
        Ok(chain)
    }
}

impl Default for DefinitionSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
