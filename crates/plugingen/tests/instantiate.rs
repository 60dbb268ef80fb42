use std::collections::HashMap;

use plugingen::instantiate::{execute_task_method, instantiate};
use plugingen::GenerateError;
use plugingen_descriptor::{ClassDescriptor, MemoryDescriptors};
use plugingen_model::{Expr, Stmt, TypeRef};
use pretty_assertions::assert_eq;

const TYPES: &str = r#"{ "types": [
    {
      "name": "com.acme.RecordTask",
      "kind": "record",
      "properties": [
        { "name": "typeName", "type": "java.lang.String" },
        { "name": "version", "type": "int" }
      ]
    },
    {
      "name": "com.acme.BeanTask",
      "properties": [
        { "name": "name", "type": "java.lang.String", "setter": "setName" },
        { "name": "count", "type": "int", "setter": "setCount" },
        { "name": "enabled", "type": "boolean", "setter": "setEnabled" }
      ]
    },
    {
      "name": "com.acme.MixedTask",
      "properties": [
        { "name": "id", "type": "java.lang.String" },
        { "name": "label", "type": "java.lang.String", "field": { "name": "label", "visibility": "public" } },
        { "name": "hidden", "type": "java.lang.String", "field": { "name": "hidden" } },
        { "name": "size", "type": "int", "setter": "setSize" }
      ],
      "constructors": [
        { "parameters": [ { "name": "id", "type": "java.lang.String" }, { "name": "extra", "type": "long" } ] }
      ]
    },
    {
      "name": "com.acme.Hidden",
      "properties": [ { "name": "id", "type": "int" } ],
      "constructors": [ { "visibility": "private" } ]
    }
] }"#;

fn descriptors() -> MemoryDescriptors {
    MemoryDescriptors::from_manifest_str(TYPES).unwrap()
}

fn class<'a>(descriptors: &'a MemoryDescriptors, name: &str) -> &'a ClassDescriptor {
    use plugingen_descriptor::DescriptorProvider;
    descriptors.load(name).unwrap()
}

fn args(names: &[&str]) -> HashMap<String, Expr> {
    names
        .iter()
        .map(|name| (name.to_string(), Expr::param(*name, TypeRef::object())))
        .collect()
}

#[test]
fn records_use_the_canonical_constructor_in_property_order() {
    let descriptors = descriptors();
    let record = class(&descriptors, "com.acme.RecordTask");

    let (local, statements) = instantiate(record, "task", &args(&["version", "typeName"])).unwrap();
    assert_eq!(local.name, "task");
    assert_eq!(local.ty, TypeRef::class("com.acme.RecordTask"));
    assert_eq!(
        statements,
        vec![local.define(TypeRef::class("com.acme.RecordTask").instantiate(vec![
            Expr::param("typeName", TypeRef::object()),
            Expr::param("version", TypeRef::object()),
        ]))]
    );
}

#[test]
fn records_require_every_component() {
    let descriptors = descriptors();
    let record = class(&descriptors, "com.acme.RecordTask");

    let err = instantiate(record, "task", &args(&["typeName"])).unwrap_err();
    match err {
        GenerateError::MissingArgument { type_name, property } => {
            assert_eq!(type_name, "com.acme.RecordTask");
            assert_eq!(property, "version");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn beans_are_built_with_setters() {
    let descriptors = descriptors();
    let bean = class(&descriptors, "com.acme.BeanTask");

    let (local, statements) =
        instantiate(bean, "result", &args(&["name", "count", "enabled"])).unwrap();
    assert_eq!(statements.len(), 4);
    assert_eq!(
        statements[0],
        local.define(TypeRef::class("com.acme.BeanTask").instantiate(Vec::new()))
    );
    let setters: Vec<String> = statements[1..]
        .iter()
        .flat_map(Stmt::invoked_methods)
        .collect();
    assert_eq!(setters, vec!["setName", "setCount", "setEnabled"]);
}

#[test]
fn unsupplied_properties_are_skipped() {
    let descriptors = descriptors();
    let bean = class(&descriptors, "com.acme.BeanTask");

    let (_, statements) = instantiate(bean, "result", &args(&["count"])).unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].invoked_methods(), vec!["setCount"]);
}

#[test]
fn mixed_binding_prefers_constructor_then_setter_then_field() {
    let descriptors = descriptors();
    let mixed = class(&descriptors, "com.acme.MixedTask");

    let (local, statements) =
        instantiate(mixed, "task", &args(&["id", "label", "hidden", "size"])).unwrap();

    // `extra` has no argument and is passed as null; `hidden` is private and left unset.
    assert_eq!(
        statements,
        vec![
            local.define(TypeRef::class("com.acme.MixedTask").instantiate(vec![
                Expr::param("id", TypeRef::object()),
                Expr::null(),
            ])),
            Stmt::assign_field(
                local.expr(),
                "label",
                TypeRef::string(),
                Expr::param("label", TypeRef::object()),
            ),
            local
                .invoke(
                    "setSize",
                    TypeRef::Void,
                    vec![Expr::param("size", TypeRef::object())],
                )
                .into(),
        ]
    );
}

#[test]
fn missing_constructor_is_reported() {
    let descriptors = descriptors();
    let hidden = class(&descriptors, "com.acme.Hidden");

    let err = instantiate(hidden, "task", &HashMap::new()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "no constructor found for com.acme.Hidden");
}

#[test]
fn task_method_is_called_on_the_new_instance() {
    let descriptors = descriptors();
    let bean = class(&descriptors, "com.acme.BeanTask");

    let stmt = execute_task_method(bean, "run", &args(&["name"])).unwrap();
    let statements = stmt.flatten();
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[2].invoked_methods(), vec!["run"]);
    let Stmt::Expr(Expr::Invoke { receiver, .. }) = statements[2] else {
        panic!("expected a call statement");
    };
    assert!(matches!(**receiver, Expr::Local(ref local) if local.name == "task"));
}
