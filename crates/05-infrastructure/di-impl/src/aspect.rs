//! 切面节点提取

use crate::document::XmlElement;
use di_abstractions::{AspectDefinition, AspectType};
use infrastructure_common::{DefinitionError, DefinitionResult};
use tracing::warn;

/// 提取 `<aspect ref="..." type="method|exception">`
///
/// 一个 `<aspect>` 下有多个 `<pointcut>` 时只保留最后一个。
pub fn extract_aspect(bean: &str, node: &XmlElement) -> DefinitionResult<AspectDefinition> {
    let aspect_bean = node
        .attribute("ref")
        .ok_or_else(|| DefinitionError::missing_attribute(bean, "aspect", "ref"))?;

    let raw_type = node.attribute("type").unwrap_or_default();
    let aspect_type =
        AspectType::from_attribute(raw_type).ok_or_else(|| DefinitionError::InvalidAspectType {
            bean: bean.to_string(),
            aspect_type: raw_type.to_string(),
        })?;

    let mut aspect = None;
    let mut pointcut_count = 0usize;
    for pointcut in node.children_named("pointcut") {
        let expression = pointcut
            .attribute("expression")
            .ok_or_else(|| DefinitionError::missing_attribute(bean, "pointcut", "expression"))?;
        aspect = Some(AspectDefinition::new(expression, aspect_type, aspect_bean));
        pointcut_count += 1;
    }

    if pointcut_count > 1 {
        warn!(
            "bean {} 的切面 {} 声明了 {} 个切点，只保留最后一个",
            bean, aspect_bean, pointcut_count
        );
    }

    aspect.ok_or_else(|| DefinitionError::MissingElement {
        bean: bean.to_string(),
        element: "pointcut".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::XmlDocument;

    fn aspect(xml: &str) -> DefinitionResult<AspectDefinition> {
        let document = XmlDocument::parse("aspect.xml", xml).unwrap();
        extract_aspect("svc", document.root())
    }

    #[test]
    fn test_method_aspect() {
        let definition =
            aspect(r#"<aspect ref="logger" type="method"><pointcut expression="^get.*"/></aspect>"#)
                .unwrap();
        assert_eq!(definition, AspectDefinition::new("^get.*", AspectType::Method, "logger"));
    }

    #[test]
    fn test_exception_aspect() {
        let definition = aspect(
            r#"<aspect ref="handler" type="exception"><pointcut expression=".*"/></aspect>"#,
        )
        .unwrap();
        assert_eq!(definition.aspect_type, AspectType::Exception);
        assert_eq!(definition.bean, "handler");
    }

    #[test]
    fn test_invalid_aspect_type() {
        let error = aspect(r#"<aspect ref="logger" type="around"><pointcut expression=".*"/></aspect>"#)
            .unwrap_err();
        assert_eq!(
            error,
            DefinitionError::InvalidAspectType {
                bean: "svc".to_string(),
                aspect_type: "around".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_type_is_invalid() {
        let error = aspect(r#"<aspect ref="logger"><pointcut expression=".*"/></aspect>"#).unwrap_err();
        assert!(matches!(error, DefinitionError::InvalidAspectType { .. }));
    }

    #[test]
    fn test_last_pointcut_wins() {
        let definition = aspect(
            r#"<aspect ref="logger" type="method">
                <pointcut expression="first"/>
                <pointcut expression="second"/>
                <pointcut expression="last"/>
            </aspect>"#,
        )
        .unwrap();
        assert_eq!(definition.pointcut, "last");
    }

    #[test]
    fn test_aspect_without_pointcut() {
        let error = aspect(r#"<aspect ref="logger" type="method"/>"#).unwrap_err();
        assert_eq!(
            error,
            DefinitionError::MissingElement {
                bean: "svc".to_string(),
                element: "pointcut".to_string(),
            }
        );
    }

    #[test]
    fn test_aspect_requires_ref() {
        let error = aspect(r#"<aspect type="method"><pointcut expression=".*"/></aspect>"#).unwrap_err();
        assert_eq!(error, DefinitionError::missing_attribute("svc", "aspect", "ref"));
    }
}
