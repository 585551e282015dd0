//! 配置文档模型
//!
//! 基于 quick-xml 事件流构建的可变元素树。装配过程需要把生成的匿名
//! bean 标识写回文档，所以这里不使用只读的解析结果。

use infrastructure_common::{ConfigError, ConfigResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文档元素
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// 设置属性，已存在时覆盖
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// 元素自身的文本内容（不含子元素）
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [XmlElement] {
        &mut self.children
    }

    /// 第一个指定名称的直接子元素
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// 所有指定名称的直接子元素，按文档顺序
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// 先序遍历自身及全部后代元素
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// 先序查找第一个满足条件的元素（含自身）
    pub fn find_descendant_mut<P>(&mut self, predicate: &P) -> Option<&mut XmlElement>
    where
        P: Fn(&XmlElement) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_descendant_mut(predicate) {
                return Some(found);
            }
        }
        None
    }

    fn is_bean(&self, id: &str) -> bool {
        self.name == "bean" && self.attribute("id") == Some(id)
    }
}

/// 先序后代迭代器
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// 已解析的配置文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    path: PathBuf,
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(path: impl Into<PathBuf>, root: XmlElement) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }

    /// 读取并解析文件
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("加载配置文档: {}", path.display());

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(path, &content)
    }

    /// 解析文档内容
    ///
    /// 收集解析过程中的全部诊断信息，任何诊断都会导致解析失败。
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> ConfigResult<Self> {
        let path = path.into();
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut diagnostics = Vec::new();

        loop {
            let position = reader.buffer_position() as usize;
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    stack.push(element_from(&start, content, position, &mut diagnostics));
                }
                Ok(Event::Empty(start)) => {
                    let element = element_from(&start, content, position, &mut diagnostics);
                    attach(element, &mut stack, &mut root, &mut diagnostics);
                }
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        attach(element, &mut stack, &mut root, &mut diagnostics);
                    }
                }
                Ok(Event::Text(text)) => match text.unescape() {
                    Ok(text) => append_text(&text, &mut stack, content, position, &mut diagnostics),
                    Err(e) => diagnostics.push(format!("第 {} 行: {}", line_of(content, position), e)),
                },
                Ok(Event::CData(cdata)) => {
                    let text = String::from_utf8_lossy(&cdata);
                    append_text(&text, &mut stack, content, position, &mut diagnostics);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    diagnostics.push(format!("第 {} 行: {}", line_of(content, position), e));
                    break;
                }
            }
        }

        for element in stack.iter().rev() {
            diagnostics.push(format!("元素 <{}> 未闭合", element.name));
        }

        match root {
            Some(root) if diagnostics.is_empty() => Ok(Self { path, root }),
            None if diagnostics.is_empty() => Err(ConfigError::parse_error(
                path.display().to_string(),
                "文档缺少根元素",
            )),
            _ => Err(ConfigError::ParseError {
                path: path.display().to_string(),
                diagnostics,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// 查找任意层级上 id 匹配的 bean 声明
    pub fn find_bean(&self, id: &str) -> Option<&XmlElement> {
        self.root.descendants().find(|e| e.is_bean(id))
    }

    pub fn find_bean_mut(&mut self, id: &str) -> Option<&mut XmlElement> {
        self.root.find_descendant_mut(&|e: &XmlElement| e.is_bean(id))
    }

    /// 同时返回文档路径与可变的 bean 声明
    pub fn find_bean_entry_mut(&mut self, id: &str) -> Option<(&Path, &mut XmlElement)> {
        let Self { path, root } = self;
        let bean = root.find_descendant_mut(&|e: &XmlElement| e.is_bean(id))?;
        Some((path.as_path(), bean))
    }

    /// 文档中声明了 id 的全部 bean
    pub fn bean_ids(&self) -> Vec<&str> {
        self.root
            .descendants()
            .filter(|e| e.name == "bean")
            .filter_map(|e| e.attribute("id"))
            .collect()
    }

    /// 文档中任意位置的导入声明
    pub fn imports(&self) -> ConfigResult<Vec<String>> {
        self.root
            .descendants()
            .filter(|e| e.name == "import")
            .map(|e| {
                e.attribute("resource")
                    .map(str::to_string)
                    .ok_or_else(|| ConfigError::InvalidImport {
                        path: self.path.display().to_string(),
                    })
            })
            .collect()
    }
}

fn element_from(
    start: &BytesStart<'_>,
    content: &str,
    position: usize,
    diagnostics: &mut Vec<String>,
) -> XmlElement {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = match attribute {
            Ok(attribute) => attribute,
            Err(e) => {
                diagnostics.push(format!("第 {} 行: {}", line_of(content, position), e));
                continue;
            }
        };
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        match attribute.unescape_value() {
            Ok(value) => element.set_attribute(key, value),
            Err(e) => diagnostics.push(format!(
                "第 {} 行: 属性 {} 无效: {}",
                line_of(content, position),
                key,
                e
            )),
        }
    }
    element
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    diagnostics: &mut Vec<String>,
) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        diagnostics.push(format!("存在多个根元素: <{}>", element.name));
    }
}

fn append_text(
    text: &str,
    stack: &mut [XmlElement],
    content: &str,
    position: usize,
    diagnostics: &mut Vec<String>,
) {
    match stack.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => diagnostics.push(format!("第 {} 行: 根元素之外存在文本", line_of(content, position))),
    }
}

fn line_of(content: &str, position: usize) -> usize {
    let end = position.min(content.len());
    content.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}
