mod support;

use plugingen::gradle::{
    create_default, GradleExtensionBuilder, GradlePluginBuilder, GradleSpecificationBuilder,
    GradleTaskBuilder, GradleTypeBuilder,
};
use plugingen::{GenerateError, GradlePluginConfig};
use plugingen_descriptor::DescriptorProvider;
use plugingen_model::{Expr, Literal, ObjectDef, ObjectKind, Stmt, TypeRef};
use pretty_assertions::assert_eq;

use support::{
    annotation_names, body, descriptors_with, inner, instantiations, local_receivers, method,
    string_literals, Fixture, ENDING, GRADLE_PACKAGE, GRADLE_TRIGGER, RECORD_TASK,
    RESOURCE_TASK, SET_OF_MODELS,
};

fn plugin_config(fixture: &Fixture, trigger: &str) -> GradlePluginConfig {
    let trigger = fixture.descriptors.load(trigger).unwrap();
    GradlePluginConfig::from_trigger(fixture.cx(), trigger).unwrap()
}

fn find<'a>(defs: &'a [ObjectDef], name: &str) -> &'a ObjectDef {
    defs.iter()
        .find(|def| def.name() == name)
        .unwrap_or_else(|| panic!("{name} was not built"))
}

fn qualified(simple: &str) -> String {
    format!("{GRADLE_PACKAGE}.{simple}")
}

fn ending_ref() -> TypeRef {
    TypeRef::Generated {
        name: qualified("model.Ending"),
        kind: ObjectKind::Enum,
    }
}

#[test]
fn resolves_plugin_configuration_from_trigger() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);

    assert_eq!(plugin.package_name, GRADLE_PACKAGE);
    assert_eq!(plugin.name_prefix, "Test");
    assert_eq!(plugin.tasks.len(), 2);
    assert_eq!(plugin.kinds.len(), 4);

    let record = &plugin.tasks[0];
    assert_eq!(record.task.name_prefix, "GenerateSimpleRecord");
    assert_eq!(record.task.method_name, "generateSimpleRecord");
    assert_eq!(record.task_javadoc, "GenerateSimpleRecord Gradle task.");
    assert_eq!(
        record.method_javadoc,
        "Generate a simple record in the supplied package and with the specified version."
    );
    assert!(record.cacheable);
    assert!(record.task.models.is_empty());

    let resource = &plugin.tasks[1];
    let models: Vec<&str> = resource.task.models.iter().map(|m| m.model.name()).collect();
    assert_eq!(
        models,
        vec![
            "io.micronaut.sourcegen.example.plugin.gradle.model.Ending",
            "io.micronaut.sourcegen.example.plugin.gradle.model.Repeat",
        ]
    );
    assert_eq!(plugin.models.len(), 2);
    let ending = resource
        .task
        .parameters
        .iter()
        .find(|p| p.name() == "ending")
        .unwrap();
    assert_eq!(ending.ty, ending_ref());
    assert_eq!(ending.javadoc, "How the file ends.");
}

#[test]
fn task_type_has_annotated_property_getters() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradleTaskBuilder.build(&plugin).unwrap();
    assert_eq!(defs.len(), 2);

    let task = find(&defs, &qualified("GenerateSimpleRecordTask"));
    let class = task.as_class().unwrap();
    assert_eq!(class.superclass, Some(TypeRef::class("org.gradle.api.DefaultTask")));
    assert_eq!(class.javadoc.as_deref(), Some("GenerateSimpleRecord Gradle task."));
    assert!(class
        .annotations
        .iter()
        .any(|a| a.name() == "org.gradle.api.tasks.CacheableTask"));

    let getters: Vec<&str> = class
        .methods
        .iter()
        .filter(|m| m.is_abstract())
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(
        getters,
        vec![
            "getTypeName",
            "getVersion",
            "getPackageName",
            "getProperties",
            "getJavadoc",
            "getOutputFolder",
            "getClasspath",
            "getWorkerExecutor",
        ]
    );

    assert_eq!(
        annotation_names(method(task, "getTypeName")),
        vec!["org.gradle.api.tasks.Input"]
    );
    assert_eq!(
        annotation_names(method(task, "getVersion")),
        vec!["org.gradle.api.tasks.Input", "org.gradle.api.tasks.Optional"]
    );
    assert_eq!(
        annotation_names(method(task, "getOutputFolder")),
        vec!["org.gradle.api.tasks.OutputDirectory"]
    );
    assert_eq!(
        method(task, "getVersion").returns,
        TypeRef::parameterized(
            "org.gradle.api.provider.Property",
            vec![TypeRef::class("java.lang.Integer")]
        )
    );
    assert_eq!(
        method(task, "getProperties").returns,
        TypeRef::parameterized(
            "org.gradle.api.provider.MapProperty",
            vec![TypeRef::string(), TypeRef::string()]
        )
    );
    assert_eq!(
        method(task, "getJavadoc").returns,
        TypeRef::parameterized("org.gradle.api.provider.ListProperty", vec![TypeRef::string()])
    );
    assert_eq!(
        method(task, "getOutputFolder").returns,
        TypeRef::class("org.gradle.api.file.DirectoryProperty")
    );

    let execute = method(task, "execute");
    assert_eq!(
        annotation_names(execute),
        vec!["org.gradle.api.tasks.TaskAction"]
    );
    assert_eq!(
        execute.javadoc.as_deref(),
        Some("Generate a simple record in the supplied package and with the specified version.")
    );
    assert_eq!(
        body(execute).invoked_methods(),
        vec!["submit", "classLoaderIsolation", "getWorkerExecutor"]
    );
}

#[test]
fn work_action_instantiates_and_runs_the_task() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradleTaskBuilder.build(&plugin).unwrap();
    let task = find(&defs, &qualified("GenerateSimpleRecordTask"));

    let inner_names: Vec<&str> = task.inner().iter().map(ObjectDef::name).collect();
    assert_eq!(
        inner_names,
        vec![
            "GenerateSimpleRecordWorkAction",
            "GenerateSimpleRecordWorkActionParameters",
            "GenerateSimpleRecordWorkActionParameterConfigurator",
            "GenerateSimpleRecordClasspathConfigurator",
        ]
    );

    let action = inner(task, "GenerateSimpleRecordWorkAction");
    let execute = body(method(action, "execute"));
    assert_eq!(instantiations(execute), vec![(RECORD_TASK.to_string(), 6)]);
    let calls = execute.invoked_methods();
    assert_eq!(calls.first().map(String::as_str), Some("getParameters"));
    assert_eq!(calls.last().map(String::as_str), Some("generateSimpleRecord"));
    // Optional parameters without a default read as null.
    assert!(calls.contains(&"getOrNull".to_string()));
    assert!(calls.contains(&"getAsFile".to_string()));

    let parameters = inner(task, "GenerateSimpleRecordWorkActionParameters");
    assert_eq!(parameters.kind(), ObjectKind::Interface);
    assert_eq!(parameters.methods().len(), 6);

    let configurator = inner(task, "GenerateSimpleRecordWorkActionParameterConfigurator");
    let configure = body(method(configurator, "execute"));
    assert_eq!(configure.flatten().len(), 6);
    let calls = configure.invoked_methods();
    assert!(calls.contains(&"orElse".to_string()));
    let mut defaults = Vec::new();
    configure.walk_exprs(&mut |expr| {
        if let Expr::Literal(literal) = expr {
            defaults.push(literal.clone());
        }
    });
    assert_eq!(
        defaults,
        vec![Literal::Int(1), Literal::String("com.example".to_string())]
    );
    assert_eq!(
        configurator.as_class().unwrap().constructors().count(),
        1
    );
}

#[test]
fn work_action_converts_model_parameters() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradleTaskBuilder.build(&plugin).unwrap();
    let task = find(&defs, &qualified("GenerateSimpleResourceTask"));

    let action = inner(task, "GenerateSimpleResourceWorkAction");
    let methods: Vec<&str> = action.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["convertEnding", "convertRepeat", "execute"]);

    let execute = body(method(action, "execute"));
    assert_eq!(instantiations(execute), vec![(RESOURCE_TASK.to_string(), 0)]);
    let calls = execute.invoked_methods();
    for expected in [
        "convertEnding",
        "convertRepeat",
        "setFileName",
        "setContent",
        "setOutputFolder",
        "setEnding",
        "setRepeat",
        "generateSimpleResource",
    ] {
        assert!(calls.contains(&expected.to_string()), "missing {expected}");
    }

    assert_eq!(
        method(task, "getEnding").returns,
        TypeRef::parameterized("org.gradle.api.provider.Property", vec![ending_ref()])
    );
    assert_eq!(
        method(task, "getEnding").javadoc.as_deref(),
        Some("How the file ends.")
    );
}

#[test]
fn work_action_iterates_sets_of_models() {
    let fixture = Fixture::new(descriptors_with(SET_OF_MODELS));
    let plugin = plugin_config(&fixture, "com.acme.gradle.BatchTrigger");
    let defs = GradleTaskBuilder.build(&plugin).unwrap();
    let task = find(&defs, "com.acme.gradle.BatchTaskTask");
    assert_eq!(
        method(task, "getSteps").returns,
        TypeRef::parameterized(
            "org.gradle.api.provider.SetProperty",
            vec![TypeRef::Generated {
                name: "com.acme.gradle.model.Step".to_string(),
                kind: ObjectKind::Class,
            }]
        )
    );

    let action = inner(task, "BatchTaskWorkAction");
    let execute = body(method(action, "execute"));
    let calls = execute.invoked_methods();
    for expected in ["iterator", "hasNext", "next", "convertStep", "convertBatch"] {
        assert!(calls.contains(&expected.to_string()), "missing {expected}");
    }
    assert!(instantiations(execute).contains(&("java.util.HashSet".to_string(), 0)));

    // Neither the action nor the Batch converter index into a set.
    for converter in action.methods() {
        let indexed: Vec<TypeRef> = local_receivers(body(converter), "get")
            .into_iter()
            .filter(|ty| ty.name() == Some("java.util.Set"))
            .collect();
        assert!(indexed.is_empty(), "{} calls get on {indexed:?}", converter.name);
    }
    assert!(!local_receivers(body(method(action, "convertBatch")), "iterator").is_empty());
}

#[test]
fn extension_registers_tasks_by_unique_name() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradleExtensionBuilder.build(&plugin).unwrap();
    assert_eq!(defs.len(), 2);

    let interface = find(&defs, &qualified("TestExtension"));
    assert_eq!(interface.kind(), ObjectKind::Interface);
    assert_eq!(interface.javadoc(), Some("Configures the Test execution."));
    let record_method = method(interface, "generateSimpleRecord");
    assert_eq!(
        record_method.parameters[1].ty,
        TypeRef::parameterized(
            "org.gradle.api.Action",
            vec![TypeRef::wildcard_super(TypeRef::class(qualified(
                "GenerateSimpleRecordSpecification"
            )))]
        )
    );
    assert!(record_method
        .javadoc
        .as_deref()
        .unwrap()
        .starts_with("Create a task for generateSimpleRecord.\nGenerate a simple record"));

    let default = find(&defs, &qualified("DefaultTestExtension"));
    assert_eq!(
        default.javadoc(),
        Some("Default implementation of the {@link io.micronaut.sourcegen.example.plugin.gradle.TestExtension}.")
    );
    let class = default.as_class().unwrap();
    let fields: Vec<&str> = class.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fields, vec!["names", "project", "classpath"]);
    let constructor = class.constructors().next().unwrap();
    assert!(constructor.has_annotation("javax.inject.Inject"));
    assert_eq!(constructor.parameters.len(), 2);

    let register = body(method(default, "generateSimpleRecord"));
    let statements = register.flatten();
    let Stmt::If { then, .. } = statements[0] else {
        panic!("expected the duplicate name check");
    };
    assert!(matches!(**then, Stmt::Throw(_)));
    assert_eq!(
        string_literals(register),
        vec!["An generateSimpleRecord definition with name '%s' was already created"]
    );
    assert_eq!(
        register.invoked_methods(),
        vec![
            "add",
            "format",
            "newInstance",
            "getObjects",
            "configureSpec",
            "execute",
            "createGenerateSimpleRecordTask",
        ]
    );

    let create = method(default, "createGenerateSimpleRecordTask");
    assert_eq!(
        body(create).invoked_methods(),
        vec!["register", "getTasks"]
    );
}

#[test]
fn extension_applies_defaults_and_conventions() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradleExtensionBuilder.build(&plugin).unwrap();
    let default = find(&defs, &qualified("DefaultTestExtension"));

    let configure_specs: Vec<_> = default
        .methods()
        .iter()
        .filter(|m| m.name == "configureSpec")
        .collect();
    assert_eq!(configure_specs.len(), 2);

    // Record task: version and packageName carry defaults.
    assert_eq!(body(configure_specs[0]).flatten().len(), 2);
    // Resource task: only the enum default.
    let resource = body(configure_specs[1]);
    assert_eq!(resource.flatten().len(), 1);
    let mut constants = Vec::new();
    resource.walk_exprs(&mut |expr| {
        if let Expr::StaticField { owner, name, .. } = expr {
            constants.push((owner.clone(), name.clone()));
        }
    });
    assert_eq!(constants, vec![(ending_ref(), "NONE".to_string())]);

    let configurator = inner(default, "GenerateSimpleResourceTaskConfigurator");
    let execute = method(configurator, "execute");
    assert_eq!(
        execute.javadoc.as_deref(),
        Some("The configurator for Test task.")
    );
    let calls = body(execute).invoked_methods();
    assert!(!calls.contains(&"setGroup".to_string()));
    assert_eq!(calls.iter().filter(|c| *c == "convention").count(), 5);
    assert_eq!(
        string_literals(body(execute)),
        vec!["Configure the generateSimpleResource"]
    );
}

#[test]
fn specification_exposes_public_parameters() {
    let fixture = Fixture::new(descriptors_with(
        r#"{ "types": [
            {
              "name": "com.acme.InternalTask",
              "properties": [
                { "name": "visible", "type": "java.lang.String", "setter": "setVisible" },
                { "name": "secret", "type": "java.lang.String", "setter": "setSecret", "parameter": { "internal": true } }
              ],
              "methods": [ { "name": "run", "executable": true } ]
            },
            {
              "name": "com.acme.gradle.Trigger",
              "gradlePlugin": { "tasks": [ { "source": "com.acme.InternalTask" } ] }
            }
        ] }"#,
    ));
    let plugin = plugin_config(&fixture, "com.acme.gradle.Trigger");
    assert_eq!(plugin.name_prefix, "Trigger");
    assert_eq!(plugin.tasks[0].task.name_prefix, "InternalTask");
    assert_eq!(plugin.tasks[0].extension_method_name, "run");

    let defs = GradleSpecificationBuilder.build(&plugin).unwrap();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name(), "com.acme.gradle.InternalTaskSpecification");
    let getters: Vec<&str> = defs[0].methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(getters, vec!["getVisible"]);

    // The task itself still declares every parameter.
    let tasks = GradleTaskBuilder.build(&plugin).unwrap();
    assert!(tasks[0].method("getSecret").is_some());
}

#[test]
fn plugin_registers_classpath_and_extension() {
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let defs = GradlePluginBuilder.build(&plugin).unwrap();
    assert_eq!(defs.len(), 1);

    let def = &defs[0];
    assert_eq!(def.name(), qualified("TestPlugin"));
    assert_eq!(
        def.as_class().unwrap().superinterfaces,
        vec![TypeRef::parameterized(
            "org.gradle.api.Plugin",
            vec![TypeRef::class("org.gradle.api.Project")]
        )]
    );
    let apply = body(method(def, "apply"));
    assert_eq!(string_literals(apply), vec!["testClasspath", "test"]);
    assert!(!apply.invoked_methods().contains(&"getDependencies".to_string()));
}

#[test]
fn plugin_options_reach_generated_code() {
    let fixture = Fixture::new(descriptors_with(&format!(
        r#"{{ "types": [
            {{
              "name": "com.acme.gradle.AcmeTrigger",
              "gradlePlugin": {{
                "namePrefix": "Acme",
                "taskGroup": "acme",
                "dependency": "com.acme:runtime:1.0",
                "types": ["GRADLE_PLUGIN", "GRADLE_EXTENSION"],
                "tasks": [ {{ "source": "{RECORD_TASK}", "cacheable": false }} ]
              }}
            }}
        ] }}"#
    )));
    let plugin = plugin_config(&fixture, "com.acme.gradle.AcmeTrigger");
    assert!(!plugin.tasks[0].cacheable);

    let defs = GradlePluginBuilder.build(&plugin).unwrap();
    let apply = body(method(&defs[0], "apply"));
    assert_eq!(
        string_literals(apply),
        vec!["acmeClasspath", "com.acme:runtime:1.0", "acme"]
    );

    let defs = GradleExtensionBuilder.build(&plugin).unwrap();
    let default = find(&defs, "com.acme.gradle.DefaultAcmeExtension");
    let configurator = inner(default, "GenerateSimpleRecordTaskTaskConfigurator");
    let calls = body(method(configurator, "execute")).invoked_methods();
    assert_eq!(calls.first().map(String::as_str), Some("setGroup"));

    let tasks = GradleTaskBuilder.build(&plugin).unwrap();
    assert!(tasks[0].as_class().unwrap().annotations.is_empty());
}

#[test]
fn unsupported_defaults_fail_generation() {
    let fixture = Fixture::new(descriptors_with(
        r#"{ "types": [
            {
              "name": "com.acme.MapTask",
              "properties": [
                { "name": "options", "type": "java.util.Map<java.lang.String, java.lang.String>", "setter": "setOptions", "parameter": { "defaultValue": "a=b" } }
              ],
              "methods": [ { "name": "run", "executable": true } ]
            },
            {
              "name": "com.acme.CountTask",
              "properties": [
                { "name": "count", "type": "java.lang.Integer", "setter": "setCount", "parameter": { "defaultValue": "many" } }
              ],
              "methods": [ { "name": "run", "executable": true } ]
            },
            { "name": "com.acme.gradle.MapTrigger", "gradlePlugin": { "tasks": [ { "source": "com.acme.MapTask" } ] } },
            { "name": "com.acme.gradle.CountTrigger", "gradlePlugin": { "tasks": [ { "source": "com.acme.CountTask" } ] } }
        ] }"#,
    ));

    let plugin = plugin_config(&fixture, "com.acme.gradle.MapTrigger");
    let err = GradleTaskBuilder.build(&plugin).unwrap_err();
    assert!(
        matches!(err, GenerateError::UnsupportedDefaultValue { ref parameter, .. } if parameter == "options"),
        "{err}"
    );

    let plugin = plugin_config(&fixture, "com.acme.gradle.CountTrigger");
    let err = GradleExtensionBuilder.build(&plugin).unwrap_err();
    assert_eq!(
        err.to_string(),
        "default value `many` of com.acme.CountTask.count is not a valid int"
    );
}

#[test]
fn enum_defaults_must_name_a_constant() {
    let fixture = Fixture::new(descriptors_with(&format!(
        r#"{{ "types": [
            {{
              "name": "com.acme.EndingTask",
              "properties": [
                {{ "name": "ending", "type": "{ENDING}", "setter": "setEnding", "parameter": {{ "defaultValue": "NEWLINES" }} }}
              ],
              "methods": [ {{ "name": "run", "executable": true }} ]
            }},
            {{ "name": "com.acme.gradle.EndingTrigger", "gradlePlugin": {{ "tasks": [ {{ "source": "com.acme.EndingTask" }} ] }} }}
        ] }}"#
    )));
    let trigger = fixture.descriptors.load("com.acme.gradle.EndingTrigger").unwrap();
    let err = GradlePluginConfig::from_trigger(fixture.cx(), trigger).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        format!("default value `NEWLINES` of com.acme.EndingTask.ending is not a valid {ENDING}")
    );

    // The declared constant still resolves to a reference to the copied enum.
    let fixture = Fixture::example();
    let plugin = plugin_config(&fixture, GRADLE_TRIGGER);
    let ending = plugin.tasks[1]
        .task
        .parameters
        .iter()
        .find(|parameter| parameter.name() == "ending")
        .unwrap();
    assert_eq!(
        create_default(RESOURCE_TASK, ending).unwrap(),
        ending_ref().static_field("NONE", ending_ref())
    );
}

#[test]
fn trigger_without_annotation_is_rejected() {
    let fixture = Fixture::example();
    let task = fixture.descriptors.load(RECORD_TASK).unwrap();
    let err = GradlePluginConfig::from_trigger(fixture.cx(), task).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        format!("{RECORD_TASK} has no GenerateGradlePlugin annotation")
    );
}
