//! 组合配置文件
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [[xml]]
//! filename = "beans.xml"
//!
//! [[xml]]
//! filename = "/etc/app/shared.xml"
//! import_base = "working_directory"
//! ```

use crate::logging::LoggingConfig;
use di_impl::XmlDriverOptions;
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 定义源组合配置
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// 日志配置，缺省时不初始化日志
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    /// XML 定义文档，按声明顺序查找
    #[serde(default)]
    pub xml: Vec<XmlDriverOptions>,
}

impl CompositionConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_options(e.to_string()))
    }

    /// 读取组合配置文件，相对的文档路径以该文件所在目录为基准
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.relative_to(base);
        }
        Ok(config)
    }

    fn relative_to(&mut self, base: &Path) {
        for options in &mut self.xml {
            if options.filename.is_relative() {
                options.filename = base.join(&options.filename);
            }
        }
    }
}
