//! # 示例应用程序
//!
//! 加载 bean 定义文档，按 id 查找定义并以 JSON 输出。
//!
//! ```text
//! example-app --beans config/beans.xml userService userDao
//! example-app --config config/composition.toml --log-level debug userService
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use infrastructure_composition::DefinitionSourceBuilder;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Ding bean 定义查看工具")]
struct Args {
    /// XML 定义文档，可重复，按顺序查找
    #[arg(short, long = "beans")]
    beans: Vec<PathBuf>,

    /// 组合配置文件 (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别，只覆盖组合配置中的级别，其余日志设置保留
    #[arg(long)]
    log_level: Option<String>,

    /// 要查看的 bean id
    #[arg(required = true)]
    bean_ids: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = match &args.config {
        Some(path) => DefinitionSourceBuilder::from_config_file(path)
            .with_context(|| format!("读取组合配置失败: {}", path.display()))?,
        None => DefinitionSourceBuilder::new(),
    };
    if let Some(level) = &args.log_level {
        builder = builder.with_log_level(level.as_str());
    }
    for path in &args.beans {
        builder = builder.add_xml_file(path)?;
    }

    let chain = builder.build()?;
    if chain.is_empty() {
        bail!("没有可用的定义源，请使用 --beans 或 --config 指定");
    }

    let mut definitions = BTreeMap::new();
    for bean_id in &args.bean_ids {
        let definition = chain
            .require(bean_id)
            .with_context(|| format!("查找 bean 失败: {}", bean_id))?;
        info!("找到 bean {} ({})", bean_id, definition.class);
        definitions.insert(bean_id.as_str(), definition);
    }

    println!("{}", serde_json::to_string_pretty(&definitions)?);
    Ok(())
}
