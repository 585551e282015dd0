//! XML 定义驱动配置选项

use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 相对导入路径的解析基准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportBase {
    /// 相对于声明导入的文档所在目录
    #[default]
    Document,
    /// 相对于进程工作目录
    WorkingDirectory,
}

/// XML 定义驱动选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDriverOptions {
    /// 根配置文档路径
    pub filename: PathBuf,
    /// 导入路径解析基准
    #[serde(default)]
    pub import_base: ImportBase,
}

impl XmlDriverOptions {
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            import_base: ImportBase::default(),
        }
    }

    pub fn with_import_base(mut self, import_base: ImportBase) -> Self {
        self.import_base = import_base;
        self
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_options(e.to_string()))
    }

    /// 从 TOML 文件读取
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
        Self::from_toml_str(&content)
    }
}
