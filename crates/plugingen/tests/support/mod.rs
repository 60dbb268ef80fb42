#![allow(dead_code)]

use std::path::PathBuf;

use plugingen::GenerationContext;
use plugingen_descriptor::{MemoryDescriptors, MemoryJavadocStore};
use plugingen_model::{Expr, MethodDef, ObjectDef, Stmt};

pub const RECORD_TASK: &str = "io.micronaut.sourcegen.example.plugin.GenerateSimpleRecordTask";
pub const RESOURCE_TASK: &str = "io.micronaut.sourcegen.example.plugin.GenerateSimpleResourceTask";
pub const ENDING: &str = "io.micronaut.sourcegen.example.plugin.GenerateSimpleResourceTask$Ending";
pub const REPEAT: &str = "io.micronaut.sourcegen.example.plugin.GenerateSimpleResourceTask$Repeat";
pub const GRADLE_TRIGGER: &str = "io.micronaut.sourcegen.example.plugin.gradle.GeneratePluginTrigger";
pub const MAVEN_TRIGGER: &str = "io.micronaut.sourcegen.example.plugin.maven.GenerateMojoTrigger";
pub const GRADLE_PACKAGE: &str = "io.micronaut.sourcegen.example.plugin.gradle";
pub const MAVEN_PACKAGE: &str = "io.micronaut.sourcegen.example.plugin.maven";

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/example_tasks.json")
}

pub fn example_descriptors() -> MemoryDescriptors {
    MemoryDescriptors::from_manifest_path(&fixture_path()).unwrap()
}

/// Example descriptors with extra types appended from a `{ "types": [...] }` snippet.
pub fn descriptors_with(extra: &str) -> MemoryDescriptors {
    let mut descriptors = example_descriptors();
    for class in MemoryDescriptors::from_manifest_str(extra).unwrap().iter() {
        descriptors.add(class.clone());
    }
    descriptors
}

pub struct Fixture {
    pub descriptors: MemoryDescriptors,
    pub javadoc: MemoryJavadocStore,
}

impl Fixture {
    pub fn new(descriptors: MemoryDescriptors) -> Self {
        Self {
            descriptors,
            javadoc: MemoryJavadocStore::new(),
        }
    }

    pub fn example() -> Self {
        Self::new(example_descriptors())
    }

    pub fn cx(&self) -> GenerationContext<'_> {
        GenerationContext::new(&self.descriptors, &self.javadoc)
    }
}

pub fn body(method: &MethodDef) -> &Stmt {
    method.body.as_ref().unwrap()
}

pub fn method<'a>(def: &'a ObjectDef, name: &str) -> &'a MethodDef {
    def.method(name)
        .unwrap_or_else(|| panic!("{} has no method {name}", def.name()))
}

pub fn inner<'a>(def: &'a ObjectDef, simple: &str) -> &'a ObjectDef {
    def.inner_type(simple)
        .unwrap_or_else(|| panic!("{} has no inner type {simple}", def.name()))
}

/// Every `new T(...)` in a statement tree.
pub fn instantiations(stmt: &Stmt) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    stmt.walk_exprs(&mut |expr| {
        if let Expr::New { ty, args } = expr {
            out.push((ty.to_string(), args.len()));
        }
    });
    out
}

pub fn string_literals(stmt: &Stmt) -> Vec<String> {
    let mut out = Vec::new();
    stmt.walk_exprs(&mut |expr| {
        if let Expr::Literal(plugingen_model::Literal::String(value)) = expr {
            out.push(value.clone());
        }
    });
    out
}

pub fn annotation_names(method: &MethodDef) -> Vec<&str> {
    method.annotations.iter().map(|a| a.name()).collect()
}

/// Static types of the locals a method is invoked on.
pub fn local_receivers(stmt: &Stmt, method_name: &str) -> Vec<plugingen_model::TypeRef> {
    let mut out = Vec::new();
    stmt.walk_exprs(&mut |expr| {
        if let Expr::Invoke {
            receiver, method, ..
        } = expr
        {
            if let Expr::Local(local) = receiver.as_ref() {
                if method == method_name {
                    out.push(local.ty.clone());
                }
            }
        }
    });
    out
}

/// Task, holder POJO and trigger whose parameters carry a `Set` of a model.
pub const SET_OF_MODELS: &str = r#"{ "types": [
    {
      "name": "com.acme.Step",
      "kind": "record",
      "properties": [ { "name": "number", "type": "int" } ]
    },
    {
      "name": "com.acme.Batch",
      "properties": [
        { "name": "steps", "type": "java.util.Set<com.acme.Step>", "setter": "setSteps" }
      ]
    },
    {
      "name": "com.acme.BatchTask",
      "pluginTask": true,
      "properties": [
        { "name": "steps", "type": "java.util.Set<com.acme.Step>", "setter": "setSteps" },
        { "name": "batch", "type": "com.acme.Batch", "setter": "setBatch" }
      ],
      "methods": [ { "name": "run", "executable": true } ]
    },
    {
      "name": "com.acme.gradle.BatchTrigger",
      "gradlePlugin": { "tasks": [ { "source": "com.acme.BatchTask" } ] }
    }
] }"#;
