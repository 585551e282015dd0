//! di-impl 集中集成测试：在临时目录中写入真实文档，经由驱动和定义源链查找
use anyhow::Result;
use di_abstractions::{
    AspectType, BeanScope, DefinitionSource, InMemoryDefinitionSource, SimpleValue,
    ValueDefinition, ValueKind,
};
use di_impl::{DocumentResolver, XmlDefinitionDriver};
use infrastructure_common::{ConfigError, DefinitionError, InfrastructureError};
use infrastructure_composition::DefinitionSourceBuilder;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// 在临时目录中搭建一组配置文档
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Result<Self> {
        init_logging();
        Ok(Self { dir: TempDir::new()? })
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }
}

fn definition_error(error: InfrastructureError) -> DefinitionError {
    match error {
        InfrastructureError::DefinitionError { source } => source,
        other => panic!("expected a definition error, got: {other}"),
    }
}

#[test]
fn test_union_of_declarations_across_imports() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <import resource="services.xml"/>
            <import resource="dao/beans.xml"/>
            <bean id="app" class="App" scope="singleton"/>
            <bean id="shared" class="FromRoot" scope="singleton"/>
        </beans>"#,
    )?;
    fixture.write(
        "services.xml",
        r#"<beans>
            <bean id="userService" class="UserService" scope="singleton"/>
            <bean id="shared" class="FromServices" scope="singleton"/>
        </beans>"#,
    )?;
    fixture.write(
        "dao/beans.xml",
        r#"<beans><bean id="userDao" class="UserDao" scope="prototype"/></beans>"#,
    )?;

    let driver = XmlDefinitionDriver::from_path(&root);
    assert_eq!(driver.lookup("app", None)?.map(|b| b.class), Some("App".to_string()));
    assert_eq!(
        driver.lookup("userService", None)?.map(|b| b.class),
        Some("UserService".to_string())
    );
    let dao = driver.lookup("userDao", None)?.expect("userDao");
    assert_eq!(dao.scope, BeanScope::Prototype);
    assert_eq!(driver.lookup("shared", None)?.map(|b| b.class), Some("FromRoot".to_string()));
    assert_eq!(driver.documents()?.len(), 3);
    Ok(())
}

#[test]
fn test_array_property_preserves_entry_order() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <bean id="svc" class="Foo" scope="singleton">
                <property name="a">
                    <array>
                        <entry key="x"><value>1</value></entry>
                        <entry key="y"><value>2</value></entry>
                    </array>
                </property>
            </bean>
        </beans>"#,
    )?;

    let bean = XmlDefinitionDriver::from_path(&root)
        .lookup("svc", None)?
        .expect("svc");
    let property = &bean.properties[0];
    assert_eq!(property.name, "a");
    assert_eq!(property.kind(), ValueKind::Array);

    let array = property.value.as_array().expect("array payload");
    assert_eq!(array.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    assert_eq!(array.get("x"), Some(&ValueDefinition::string("1")));
    assert_eq!(array.get("y"), Some(&ValueDefinition::string("2")));
    Ok(())
}

#[test]
fn test_constructor_reference() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans><bean id="svc" class="Foo" scope="singleton"><constructor-arg><ref bean="dep"/></constructor-arg></bean></beans>"#,
    )?;

    let bean = XmlDefinitionDriver::from_path(&root)
        .lookup("svc", None)?
        .expect("svc");
    assert_eq!(bean.name, "svc");
    assert_eq!(bean.class, "Foo");
    assert_eq!(bean.scope, BeanScope::Singleton);
    assert_eq!(bean.arguments.len(), 1);
    assert_eq!(bean.arguments[0].kind(), ValueKind::BeanRef);
    assert_eq!(bean.arguments[0].value.referenced_bean(), Some("dep"));
    Ok(())
}

#[test]
fn test_unknown_scope_is_rejected() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans><bean id="svc" class="Foo" scope="request"/></beans>"#,
    )?;

    let error = XmlDefinitionDriver::from_path(&root)
        .lookup("svc", None)
        .unwrap_err();
    assert_eq!(
        definition_error(error),
        DefinitionError::InvalidScope {
            bean: "svc".to_string(),
            scope: "request".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_anonymous_beans_get_distinct_ids() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <bean id="svc" class="Foo" scope="singleton">
                <property name="first"><bean class="A" scope="prototype"/></property>
                <property name="second"><bean class="B" scope="prototype"/></property>
            </bean>
        </beans>"#,
    )?;

    let driver = XmlDefinitionDriver::from_path(&root);
    let bean = driver.lookup("svc", None)?.expect("svc");
    let first = bean.properties[0].value.referenced_bean().expect("first ref").to_string();
    let second = bean.properties[1].value.referenced_bean().expect("second ref").to_string();
    assert_ne!(first, second);

    // 合成的 id 已写回文档，可以像普通 bean 一样查找
    assert_eq!(driver.lookup(&first, None)?.map(|b| b.class), Some("A".to_string()));
    assert_eq!(driver.lookup(&second, None)?.map(|b| b.class), Some("B".to_string()));

    // 再次装配不会重新生成 id
    assert_eq!(driver.lookup("svc", None)?.expect("svc"), bean);
    Ok(())
}

#[test]
fn test_resolution_is_idempotent() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans><import resource="more.xml"/><bean id="a" class="A" scope="singleton"/></beans>"#,
    )?;
    fixture.write("more.xml", r#"<beans><bean id="b" class="B" scope="singleton"/></beans>"#)?;

    let resolver = DocumentResolver::default();
    let first = resolver.resolve(&root)?;
    let second = resolver.resolve(&root)?;
    assert_eq!(first, second);
    assert_eq!(first.document_ids(), second.document_ids());
    Ok(())
}

#[test]
fn test_marker_priority_ignores_document_order() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <bean id="svc" class="Foo" scope="singleton">
                <property name="nullFirst"><null/><true/></property>
                <property name="trueFirst"><true/><null/></property>
            </bean>
        </beans>"#,
    )?;

    let bean = XmlDefinitionDriver::from_path(&root)
        .lookup("svc", None)?
        .expect("svc");
    for property in &bean.properties {
        assert_eq!(property.value.as_simple(), Some(&SimpleValue::Null), "{}", property.name);
    }
    Ok(())
}

#[test]
fn test_full_declaration_with_aspects() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <bean id="svc" class="Foo" scope="prototype"
                  factory-method="create" factory-bean="factory"
                  init-method="init" destroy-method="close"
                  depends-on="a, b">
                <property name="limit"><eval>10 * 2</eval></property>
                <aspect ref="audit" type="method">
                    <pointcut expression="Foo::*"/>
                </aspect>
                <aspect ref="guard" type="exception">
                    <pointcut expression="Foo::save"/>
                </aspect>
            </bean>
        </beans>"#,
    )?;

    let bean = XmlDefinitionDriver::from_path(&root)
        .lookup("svc", None)?
        .expect("svc");
    assert_eq!(bean.scope, BeanScope::Prototype);
    assert_eq!(bean.factory_method.as_deref(), Some("create"));
    assert_eq!(bean.factory_bean.as_deref(), Some("factory"));
    assert_eq!(bean.init_method.as_deref(), Some("init"));
    assert_eq!(bean.destroy_method.as_deref(), Some("close"));
    assert_eq!(bean.depends_on, vec!["a", "b"]);
    assert_eq!(bean.properties[0].value.as_code(), Some("10 * 2"));
    assert_eq!(bean.aspects.len(), 2);
    assert_eq!(bean.aspects[0].bean, "audit");
    assert_eq!(bean.aspects[0].aspect_type, AspectType::Method);
    assert_eq!(bean.aspects[1].pointcut, "Foo::save");
    assert_eq!(bean.aspects[1].aspect_type, AspectType::Exception);
    Ok(())
}

#[test]
fn test_cyclic_import_fails_lookup() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write("a.xml", r#"<beans><import resource="b.xml"/></beans>"#)?;
    fixture.write("b.xml", r#"<beans><import resource="a.xml"/></beans>"#)?;

    let error = XmlDefinitionDriver::from_path(&root)
        .lookup("anything", None)
        .unwrap_err();
    assert!(matches!(
        error,
        InfrastructureError::ConfigError {
            source: ConfigError::CyclicImport { .. }
        }
    ));
    Ok(())
}

#[test]
fn test_chain_falls_through_to_xml_and_reports_missing_beans() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans><bean id="svc" class="FromXml" scope="singleton"/></beans>"#,
    )?;
    let memory = Arc::new(InMemoryDefinitionSource::new());
    memory.register(di_abstractions::BeanDefinition::new("clock").with_class("SystemClock"));

    let chain = DefinitionSourceBuilder::new()
        .add_shared_source(memory)
        .add_xml_file(&root)?
        .build()?;

    assert_eq!(chain.require("clock")?.class, "SystemClock");
    assert_eq!(chain.require("svc")?.class, "FromXml");
    assert!(chain.contains("svc")?);

    let error = chain.require("ghost").unwrap_err();
    assert!(error.is_bean_not_found());
    assert_eq!(
        definition_error(error),
        DefinitionError::BeanNotFound {
            bean: "ghost".to_string()
        }
    );
    Ok(())
}

#[test]
fn test_driver_is_shareable_across_threads() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans><bean id="svc" class="Foo" scope="singleton"><property name="p"><bean class="Inner" scope="prototype"/></property></bean></beans>"#,
    )?;

    let driver: Arc<dyn DefinitionSource> = Arc::new(XmlDefinitionDriver::from_path(&root));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let driver = Arc::clone(&driver);
            std::thread::spawn(move || driver.find_definition("svc"))
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        let bean = handle.join().expect("lookup thread")?.expect("svc");
        results.push(bean);
    }
    // 同一个内联 bean 只会合成一次 id
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[test]
fn test_chained_documents_synthesize_distinct_inline_ids() -> Result<()> {
    let fixture = Fixture::new()?;
    let left = fixture.write(
        "left.xml",
        r#"<beans><bean id="left" class="Left" scope="singleton"><property name="inner"><bean class="InnerA" scope="prototype"/></property></bean></beans>"#,
    )?;
    let right = fixture.write(
        "right.xml",
        r#"<beans><bean id="right" class="Right" scope="singleton"><property name="inner"><bean class="InnerB" scope="prototype"/></property></bean></beans>"#,
    )?;

    let chain = DefinitionSourceBuilder::new()
        .add_xml_file(&left)?
        .add_xml_file(&right)?
        .build()?;

    let left_bean = chain.require("left")?;
    let right_bean = chain.require("right")?;
    let left_inner = left_bean.properties[0].value.referenced_bean().expect("left ref");
    let right_inner = right_bean.properties[0].value.referenced_bean().expect("right ref");
    assert_ne!(left_inner, right_inner);

    // 容器沿链查找内联 bean 时必须拿到各自文档中的声明
    assert_eq!(chain.require(left_inner)?.class, "InnerA");
    assert_eq!(chain.require(right_inner)?.class, "InnerB");
    Ok(())
}

#[test]
fn test_declared_id_in_generated_format_is_not_shadowed() -> Result<()> {
    let fixture = Fixture::new()?;
    let root = fixture.write(
        "beans.xml",
        r#"<beans>
            <bean id="svc" class="Foo" scope="singleton">
                <property name="inner"><bean class="Inner" scope="prototype"/></property>
            </bean>
            <bean id="anonymous-bean#1" class="Declared" scope="singleton"/>
        </beans>"#,
    )?;

    let driver = XmlDefinitionDriver::from_path(&root);
    let svc = driver.lookup("svc", None)?.expect("svc");
    let inner = svc.properties[0].value.referenced_bean().expect("inner ref");
    assert_ne!(inner, "anonymous-bean#1");
    assert_eq!(driver.lookup(inner, None)?.map(|b| b.class), Some("Inner".to_string()));
    assert_eq!(
        driver.lookup("anonymous-bean#1", None)?.map(|b| b.class),
        Some("Declared".to_string())
    );
    Ok(())
}
