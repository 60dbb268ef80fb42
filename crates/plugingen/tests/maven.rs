mod support;

use plugingen::{MavenMojoBuilder, MavenPluginConfig};
use plugingen_descriptor::DescriptorProvider;
use plugingen_model::{Expr, FieldDef, Literal, Modifier, ObjectDef, Stmt, TypeRef};
use pretty_assertions::assert_eq;

use support::{
    body, descriptors_with, instantiations, method, string_literals, Fixture, MAVEN_PACKAGE,
    MAVEN_TRIGGER, RECORD_TASK, RESOURCE_TASK,
};

fn plugin_config(fixture: &Fixture, trigger: &str) -> MavenPluginConfig {
    let trigger = fixture.descriptors.load(trigger).unwrap();
    MavenPluginConfig::from_trigger(fixture.cx(), trigger).unwrap()
}

fn build(fixture: &Fixture, trigger: &str) -> Vec<ObjectDef> {
    MavenMojoBuilder::new()
        .build_all(&plugin_config(fixture, trigger))
        .unwrap()
}

fn field<'a>(def: &'a ObjectDef, name: &str) -> &'a FieldDef {
    def.as_class()
        .unwrap()
        .fields
        .iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("{} has no field {name}", def.name()))
}

fn parameter_members(field: &FieldDef) -> Vec<(&str, &Expr)> {
    field
        .annotation("org.apache.maven.plugins.annotations.Parameter")
        .unwrap()
        .members
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect()
}

#[test]
fn mojo_fields_carry_parameter_annotations() {
    let fixture = Fixture::example();
    let defs = build(&fixture, MAVEN_TRIGGER);
    assert_eq!(defs.len(), 2);

    let mojo = &defs[0];
    assert_eq!(
        mojo.name(),
        format!("{MAVEN_PACKAGE}.GenerateSimpleRecordMojo")
    );
    let class = mojo.as_class().unwrap();
    assert_eq!(class.modifiers, vec![Modifier::Public, Modifier::Abstract]);
    assert_eq!(
        class.superclass,
        Some(TypeRef::class("org.apache.maven.plugin.AbstractMojo"))
    );
    assert_eq!(
        class.javadoc.as_deref(),
        Some("GenerateSimpleRecord Maven mojo.")
    );

    let fields: Vec<&str> = class.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        fields,
        vec!["typeName", "version", "packageName", "properties", "javadoc"]
    );
    assert!(class
        .fields
        .iter()
        .all(|f| f.modifiers == vec![Modifier::Protected]));

    assert_eq!(
        parameter_members(field(mojo, "typeName")),
        vec![
            ("required", &Expr::Literal(Literal::Boolean(true))),
            ("property", &Expr::string("test.type.name")),
        ]
    );
    assert_eq!(
        parameter_members(field(mojo, "version")),
        vec![
            ("defaultValue", &Expr::string("1")),
            ("property", &Expr::string("test.version")),
        ]
    );
    assert_eq!(
        parameter_members(field(mojo, "packageName")),
        vec![
            ("defaultValue", &Expr::string("com.example")),
            ("property", &Expr::string("test.package.name")),
        ]
    );
    assert!(parameter_members(field(mojo, "javadoc")).is_empty());
    assert_eq!(
        field(mojo, "properties").ty,
        TypeRef::parameterized(
            "java.util.Map",
            vec![TypeRef::string(), TypeRef::string()]
        )
    );
}

#[test]
fn output_parameters_become_abstract_getters() {
    let fixture = Fixture::example();
    let defs = build(&fixture, MAVEN_TRIGGER);
    let mojo = &defs[0];

    let methods: Vec<&str> = mojo.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["getOutputFolder", "isEnabled", "execute"]);

    let getter = method(mojo, "getOutputFolder");
    assert_eq!(getter.modifiers, vec![Modifier::Protected, Modifier::Abstract]);
    assert_eq!(getter.returns, TypeRef::file());
    assert!(getter.body.is_none());

    let enabled = method(mojo, "isEnabled");
    assert!(enabled.is_abstract());
    assert_eq!(enabled.returns, TypeRef::boolean());
}

#[test]
fn execute_skips_disabled_mojos() {
    let fixture = Fixture::example();
    let defs = build(&fixture, MAVEN_TRIGGER);
    let execute = method(&defs[0], "execute");
    assert!(execute.overrides);
    assert_eq!(
        execute.javadoc.as_deref(),
        Some("Generate a simple record in the supplied package and with the specified version.")
    );

    let Stmt::IfElse {
        cond,
        then,
        otherwise,
    } = body(execute)
    else {
        panic!("expected the enabled check");
    };
    assert_eq!(cond.invoked_method(), None);
    assert!(matches!(cond, Expr::Not(inner) if inner.invoked_method() == Some("isEnabled")));
    assert_eq!(then.invoked_methods(), vec!["debug", "getLog"]);
    assert_eq!(
        string_literals(then),
        vec!["GenerateSimpleRecordMojo is disabled"]
    );

    assert_eq!(instantiations(otherwise), vec![(RECORD_TASK.to_string(), 6)]);
    let calls = otherwise.invoked_methods();
    assert_eq!(calls, vec!["getOutputFolder", "generateSimpleRecord"]);
}

#[test]
fn model_parameters_are_converted_before_the_call() {
    let fixture = Fixture::example();
    let defs = build(&fixture, MAVEN_TRIGGER);
    let mojo = &defs[1];
    assert_eq!(
        mojo.name(),
        format!("{MAVEN_PACKAGE}.GenerateSimpleResourceMojo")
    );

    let methods: Vec<&str> = mojo.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        methods,
        vec![
            "getOutputFolder",
            "isEnabled",
            "convertEnding",
            "convertRepeat",
            "execute",
        ]
    );
    assert_eq!(
        field(mojo, "ending").ty.name(),
        Some("io.micronaut.sourcegen.example.plugin.maven.model.Ending")
    );
    assert_eq!(
        parameter_members(field(mojo, "ending")),
        vec![("defaultValue", &Expr::string("NONE"))]
    );

    let Stmt::IfElse { otherwise, .. } = body(method(mojo, "execute")) else {
        panic!("expected the enabled check");
    };
    assert_eq!(instantiations(otherwise), vec![(RESOURCE_TASK.to_string(), 0)]);
    assert_eq!(
        otherwise.invoked_methods(),
        vec![
            "convertEnding",
            "convertRepeat",
            "setFileName",
            "setContent",
            "setOutputFolder",
            "getOutputFolder",
            "setEnding",
            "setRepeat",
            "generateSimpleResource",
        ]
    );
}

#[test]
fn models_are_shared_between_mojos_of_one_trigger() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, MAVEN_TRIGGER);
    let names: Vec<&str> = plugin.models.iter().map(|m| m.model.name()).collect();
    assert_eq!(
        names,
        vec![
            "io.micronaut.sourcegen.example.plugin.maven.model.Ending",
            "io.micronaut.sourcegen.example.plugin.maven.model.Repeat",
        ]
    );
}

#[test]
fn defaults_apply_when_the_annotation_is_sparse() {
    let fixture = Fixture::new(descriptors_with(&format!(
        r#"{{ "types": [
            {{
              "name": "com.acme.maven.Trigger",
              "mavenMojos": [ {{ "source": "{RECORD_TASK}" }} ]
            }}
        ] }}"#
    )));
    let plugin = plugin_config(&fixture, "com.acme.maven.Trigger");
    let mojo = &plugin.mojos[0];
    assert!(mojo.micronaut_plugin);
    assert_eq!(mojo.property_key("outputDirectory"), "output.directory");
    assert_eq!(mojo.task.name_prefix, "GenerateSimpleRecordTask");
    assert_eq!(mojo.method_javadoc, "Generate a simple record in the supplied package and with the specified version.");

    let def = MavenMojoBuilder::new().build(mojo).unwrap();
    assert_eq!(def.name(), "com.acme.maven.GenerateSimpleRecordTaskMojo");
    assert_eq!(
        def.as_class().unwrap().superclass,
        Some(TypeRef::class("io.micronaut.maven.AbstractMicronautMojo"))
    );
    assert_eq!(
        parameter_members(field(&def, "typeName")),
        vec![
            ("required", &Expr::Literal(Literal::Boolean(true))),
            ("property", &Expr::string("type.name")),
        ]
    );
}

#[test]
fn internal_parameters_are_left_to_subclasses() {
    let fixture = Fixture::new(descriptors_with(
        r#"{ "types": [
            {
              "name": "com.acme.InternalTask",
              "properties": [
                { "name": "visible", "type": "java.lang.String", "setter": "setVisible" },
                { "name": "session", "type": "java.lang.Object", "setter": "setSession", "parameter": { "internal": true } }
              ],
              "methods": [ { "name": "run", "executable": true } ]
            },
            {
              "name": "com.acme.maven.Trigger",
              "mavenMojos": [ { "source": "com.acme.InternalTask", "namePrefix": "Internal" } ]
            }
        ] }"#,
    ));
    let defs = build(&fixture, "com.acme.maven.Trigger");
    let mojo = &defs[0];
    assert_eq!(mojo.name(), "com.acme.maven.InternalMojo");
    assert_eq!(mojo.javadoc(), Some("Internal Maven mojo."));

    let fields: Vec<&str> = mojo
        .as_class()
        .unwrap()
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(fields, vec!["visible"]);
    assert_eq!(
        method(mojo, "getSession").returns,
        TypeRef::object()
    );
    assert_eq!(
        method(mojo, "execute").javadoc.as_deref(),
        Some("Main execution of Internal mojo.")
    );
}

#[test]
fn trigger_without_mojos_is_rejected() {
    let fixture = Fixture::example();
    let trigger = fixture.descriptors.load(RECORD_TASK).unwrap();
    let err = MavenPluginConfig::from_trigger(fixture.cx(), trigger).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        format!("{RECORD_TASK} has no GenerateMavenMojo annotation")
    );
}
