//! Statements that construct a task (or model) instance from named argument expressions.

use std::collections::HashMap;

use plugingen_descriptor::ClassDescriptor;
use plugingen_model::{Expr, Local, Stmt, TypeRef};

use crate::error::{GenerateError, Result};

/// Builds `T name = new T(...)` plus whatever property assignments the type needs.
///
/// Records get every argument through their canonical constructor, in property order.
/// Other classes get their primary constructor's parameters by name (`null` when not
/// supplied), then a setter call or a direct field assignment for every remaining
/// supplied property. Properties reachable by neither are left unset.
pub fn instantiate(
    class: &ClassDescriptor,
    local_name: &str,
    arguments: &HashMap<String, Expr>,
) -> Result<(Local, Vec<Stmt>)> {
    let ty = class.java_type().to_type_ref();
    let local = Local::new(local_name, ty.clone());
    let constructor = class
        .primary_constructor()
        .ok_or_else(|| GenerateError::NoConstructor {
            type_name: class.name.clone(),
        })?;

    if class.is_record() {
        let args = class
            .properties
            .iter()
            .map(|property| {
                arguments
                    .get(&property.name)
                    .cloned()
                    .ok_or_else(|| GenerateError::MissingArgument {
                        type_name: class.name.clone(),
                        property: property.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let statements = vec![local.define(ty.instantiate(args))];
        return Ok((local, statements));
    }

    let mut fulfilled: Vec<&str> = Vec::new();
    let mut args = Vec::with_capacity(constructor.parameters.len());
    for param in &constructor.parameters {
        fulfilled.push(&param.name);
        args.push(arguments.get(&param.name).cloned().unwrap_or_else(Expr::null));
    }
    let mut statements = vec![local.define(ty.instantiate(args))];

    for property in &class.properties {
        if fulfilled.contains(&property.name.as_str()) {
            continue;
        }
        let Some(value) = arguments.get(&property.name) else {
            continue;
        };
        if let Some(setter) = &property.setter {
            statements.push(
                local
                    .invoke(setter.clone(), TypeRef::Void, vec![value.clone()])
                    .into(),
            );
        } else if let Some(field) = property.accessible_field() {
            statements.push(Stmt::assign_field(
                local.expr(),
                field.name.clone(),
                property.ty.to_type_ref(),
                value.clone(),
            ));
        } else {
            tracing::debug!(
                type_name = %class.name,
                property = %property.name,
                "property has neither a setter nor an accessible field, leaving it unset"
            );
        }
    }
    Ok((local, statements))
}

/// Instantiates the task into a local named `task` and calls its entry method.
pub fn execute_task_method(
    class: &ClassDescriptor,
    method_name: &str,
    arguments: &HashMap<String, Expr>,
) -> Result<Stmt> {
    let (task, mut statements) = instantiate(class, "task", arguments)?;
    statements.push(task.invoke(method_name, TypeRef::Void, Vec::new()).into());
    Ok(Stmt::block(statements))
}
