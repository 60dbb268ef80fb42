//! Copies complex parameter types into self-contained model types.
//!
//! Generated plugin code must not depend on the task's own classes, so every enum and
//! POJO reachable from a task parameter is copied into `<package>.model` together with
//! a `convert<Name>` method that turns the copy back into the original. Collections of
//! such types are retyped over the copy and converted element by element where used.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use plugingen_descriptor::{ClassDescriptor, CollectionKind, JavaType, TypeClass};
use plugingen_model::naming::{capitalize, getter_name, strip_enclosing};
use plugingen_model::{
    ClassDef, EnumDef, Expr, Local, MethodDef, Modifier, ObjectDef,
    ObjectKind, PropertyDef, Stmt, TypeRef,
};

use crate::context::GenerationContext;
use crate::error::Result;
use crate::instantiate::instantiate;

/// How a value of a mirrored type turns back into the original type.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Identity,
    /// `this.<converter>(value)`.
    Model { converter: String, original: TypeRef },
    /// Element-wise conversion into a fresh list or set.
    Collection {
        converter: String,
        kind: CollectionKind,
        replica: TypeRef,
        original: TypeRef,
        element: TypeRef,
    },
}

impl Conversion {
    /// Qualified name of the original model type this conversion relies on.
    pub fn model_name(&self) -> Option<&str> {
        match self {
            Conversion::Identity => None,
            Conversion::Model { original, .. } => original.name(),
            Conversion::Collection { element, .. } => element.name(),
        }
    }
}

/// The type generated code uses for a value, plus how to get back to the original.
#[derive(Debug, Clone, PartialEq)]
pub struct MirroredRef {
    pub ty: TypeRef,
    pub conversion: Conversion,
}

impl MirroredRef {
    pub fn passthrough(ty: &JavaType) -> Self {
        Self {
            ty: ty.to_type_ref(),
            conversion: Conversion::Identity,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.conversion != Conversion::Identity
    }
}

/// A model copy and the method converting it back.
#[derive(Debug, Clone, PartialEq)]
pub struct MirroredType {
    pub model: ObjectDef,
    pub original: JavaType,
    pub conversion: MethodDef,
    pub ty: TypeRef,
}

#[derive(Debug)]
struct Entry {
    ty: TypeRef,
    converter: String,
    original: TypeRef,
    /// `None` while the copy is still being built.
    mirrored: Option<MirroredType>,
    deps: Vec<String>,
}

impl Entry {
    fn reference(&self) -> MirroredRef {
        MirroredRef {
            ty: self.ty.clone(),
            conversion: Conversion::Model {
                converter: self.converter.clone(),
                original: self.original.clone(),
            },
        }
    }
}

/// Model copies created during one generation pass, keyed by original type name.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    entries: IndexMap<String, Entry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, original: &str) -> Option<&MirroredType> {
        self.entries.get(original)?.mirrored.as_ref()
    }

    /// Completed copies in creation order.
    pub fn models(&self) -> impl Iterator<Item = &MirroredType> {
        self.entries.values().filter_map(|entry| entry.mirrored.as_ref())
    }
}

/// Mirrors the parameter types of one task into `package`.
///
/// Tracks every model the task touches, directly or through other models, so the
/// task's generated code can carry exactly the conversion methods it needs.
pub struct TypeMirror<'r, 'c> {
    cx: GenerationContext<'c>,
    package: String,
    registry: &'r mut ModelRegistry,
    touched: IndexSet<String>,
}

impl<'r, 'c> TypeMirror<'r, 'c> {
    pub fn new(
        cx: GenerationContext<'c>,
        package: impl Into<String>,
        registry: &'r mut ModelRegistry,
    ) -> Self {
        Self {
            cx,
            package: package.into(),
            registry,
            touched: IndexSet::new(),
        }
    }

    pub fn mirror(&mut self, ty: &JavaType) -> Result<MirroredRef> {
        match self.cx.provider().classify(ty) {
            TypeClass::Enum => self.model(ty, ObjectKind::Enum),
            TypeClass::Pojo => self.model(ty, ObjectKind::Class),
            TypeClass::Collection { kind, element } if self.cx.provider().is_model(&element) => {
                let element_ref = self.mirror(&element)?;
                let replica = TypeRef::parameterized(ty.name.clone(), vec![element_ref.ty]);
                Ok(MirroredRef {
                    ty: replica.clone(),
                    conversion: Conversion::Collection {
                        converter: converter_name(&element),
                        kind,
                        replica,
                        original: ty.to_type_ref(),
                        element: element.to_type_ref(),
                    },
                })
            }
            _ => Ok(MirroredRef::passthrough(ty)),
        }
    }

    /// Models touched so far, in registry order.
    pub fn finish(self) -> Vec<MirroredType> {
        self.registry
            .entries
            .iter()
            .filter(|(name, _)| self.touched.contains(*name))
            .filter_map(|(_, entry)| entry.mirrored.clone())
            .collect()
    }

    fn model(&mut self, ty: &JavaType, kind: ObjectKind) -> Result<MirroredRef> {
        if let Some(entry) = self.registry.entries.get(&ty.name) {
            let reference = entry.reference();
            self.touch(&ty.name);
            return Ok(reference);
        }

        let class = self.cx.load(&ty.name)?;
        let name = format!("{}.{}", self.package, strip_enclosing(ty.simple_name()));
        let replica = TypeRef::Generated { name, kind };
        let entry = Entry {
            ty: replica.clone(),
            converter: converter_name(ty),
            original: ty.to_type_ref(),
            mirrored: None,
            deps: Vec::new(),
        };
        let reference = entry.reference();
        // Reserved before recursing so self-references resolve to the copy in progress.
        self.registry.entries.insert(ty.name.clone(), entry);
        self.touch(&ty.name);

        let built = match kind {
            ObjectKind::Enum => self.copy_enum(class, &replica).map(|m| (m, Vec::new())),
            _ => self.copy_pojo(class, &replica),
        };
        match built {
            Ok((mirrored, deps)) => {
                if let Some(entry) = self.registry.entries.get_mut(&ty.name) {
                    entry.mirrored = Some(mirrored);
                    entry.deps = deps;
                }
                Ok(reference)
            }
            Err(err) => {
                self.registry.entries.shift_remove(&ty.name);
                Err(err)
            }
        }
    }

    fn touch(&mut self, name: &str) {
        if !self.touched.insert(name.to_string()) {
            return;
        }
        let deps = self
            .registry
            .entries
            .get(name)
            .map(|entry| entry.deps.clone())
            .unwrap_or_default();
        for dep in deps {
            self.touch(&dep);
        }
    }

    fn copy_enum(&mut self, class: &ClassDescriptor, replica: &TypeRef) -> Result<MirroredType> {
        tracing::info!(type_name = %class.name, "copying plugin model for enum");
        let javadoc = self.cx.javadoc(&class.name)?;
        let name = replica.name().unwrap_or_default().to_string();
        let mut def = EnumDef::new(name)
            .with_modifiers(&[Modifier::Public])
            .with_javadoc(
                javadoc
                    .javadoc
                    .unwrap_or_else(|| format!("{} enum.", class.name)),
            );
        for constant in &class.enum_constants {
            def = def.with_constant(constant.clone());
        }

        let original = class.java_type().to_type_ref();
        let conversion = MethodDef::new(converter_name(&class.java_type()))
            .returns(original.clone())
            .with_parameter("value", replica.clone())
            .build(|params| {
                let value = params[0].clone();
                Stmt::if_else(
                    value.clone().is_null(),
                    Expr::null().returning(),
                    original
                        .invoke_static(
                            "valueOf",
                            original.clone(),
                            vec![value.invoke("name", TypeRef::string(), Vec::new())],
                        )
                        .returning(),
                )
            });

        Ok(MirroredType {
            model: def.into(),
            original: class.java_type(),
            conversion,
            ty: replica.clone(),
        })
    }

    fn copy_pojo(
        &mut self,
        class: &ClassDescriptor,
        replica: &TypeRef,
    ) -> Result<(MirroredType, Vec<String>)> {
        tracing::info!(type_name = %class.name, "copying plugin model for POJO");
        let javadoc = self.cx.javadoc(&class.name)?;
        let name = replica.name().unwrap_or_default().to_string();
        let mut def = ClassDef::new(name)
            .with_modifiers(&[Modifier::Public])
            .with_javadoc(
                javadoc
                    .javadoc
                    .clone()
                    .unwrap_or_else(|| format!("{} class.", class.name)),
            )
            .with_superinterface(TypeRef::class("java.io.Serializable"));

        let mut references = Vec::with_capacity(class.properties.len());
        let mut deps = Vec::new();
        for property in &class.properties {
            let reference = self.mirror(&property.ty)?;
            if let Some(model) = reference.conversion.model_name() {
                deps.push(model.to_string());
            }
            let doc = javadoc
                .element(&property.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} property.", property.name));
            def = def.with_property(
                PropertyDef::new(property.name.clone(), reference.ty.clone())
                    .with_modifiers(&[Modifier::Public])
                    .with_javadoc(doc),
            );
            references.push(reference);
        }

        let properties = def.properties.clone();
        for index in 0..properties.len() {
            let doc = javadoc.element(&properties[index].name);
            def = def.with_method(wither(&properties, doc, index));
        }
        let mut def = def.with_all_fields_constructor(&[Modifier::Public]);
        if !properties.is_empty() {
            def = def.with_constructor(Vec::new(), &[Modifier::Public]);
        }

        let original = class.java_type().to_type_ref();
        let conversion = MethodDef::new(converter_name(&class.java_type()))
            .returns(original)
            .with_parameter("value", replica.clone())
            .try_build(|params| {
                let value = &params[0];
                let mut statements = Vec::new();
                let mut arguments = HashMap::new();
                for (property, reference) in class.properties.iter().zip(&references) {
                    let read =
                        value
                            .clone()
                            .invoke(getter_name(&property.name), reference.ty.clone(), Vec::new());
                    let converted = convert_if_required(
                        &reference.conversion,
                        &format!("{}Param", capitalize(&property.name)),
                        &mut statements,
                        read,
                    );
                    arguments.insert(property.name.clone(), converted);
                }
                let (result, construct) = instantiate(class, "result", &arguments)?;
                statements.extend(construct);
                statements.push(result.expr().returning());
                Ok::<_, crate::error::GenerateError>(Stmt::if_else(
                    value.clone().is_null(),
                    Expr::null().returning(),
                    Stmt::block(statements),
                ))
            })?;

        let mirrored = MirroredType {
            model: def.into(),
            original: class.java_type(),
            conversion,
            ty: replica.clone(),
        };
        Ok((mirrored, deps))
    }
}

/// `with<Name>(value)`: a copy with only one property replaced.
fn wither(properties: &[PropertyDef], doc: Option<&str>, index: usize) -> MethodDef {
    let property = &properties[index];
    let mut javadoc = format!("Create a copy and set {}.", property.name);
    if let Some(doc) = doc {
        javadoc.push('\n');
        javadoc.push_str(doc);
    }
    MethodDef::new(format!("with{}", capitalize(&property.name)))
        .with_modifiers(&[Modifier::Public])
        .with_javadoc(javadoc)
        .with_parameter(property.name.clone(), property.ty.clone())
        .returns(TypeRef::This)
        .build(|params| {
            let args = properties
                .iter()
                .enumerate()
                .map(|(j, other)| {
                    if j == index {
                        params[0].clone()
                    } else {
                        Expr::This.field(other.name.clone(), other.ty.clone())
                    }
                })
                .collect();
            TypeRef::This.instantiate(args).returning()
        })
}

/// `convert<SimpleName>`, with any enclosing-type prefix dropped.
pub fn converter_name(original: &JavaType) -> String {
    format!("convert{}", strip_enclosing(original.simple_name()))
}

/// Appends whatever statements turn `value` back into the original type and returns
/// the expression holding the converted value.
pub fn convert_if_required(
    conversion: &Conversion,
    name: &str,
    statements: &mut Vec<Stmt>,
    value: Expr,
) -> Expr {
    match conversion {
        Conversion::Identity => value,
        Conversion::Model {
            converter,
            original,
        } => {
            let local = Local::new(name, original.clone());
            statements.push(local.define(Expr::This.invoke(
                converter.clone(),
                original.clone(),
                vec![value],
            )));
            local.expr()
        }
        Conversion::Collection {
            converter,
            kind,
            replica,
            original,
            element,
        } => {
            let source = Local::new(format!("{name}Source"), replica.clone());
            statements.push(source.define(value));
            let local = Local::new(name, original.clone());
            statements.push(local.define(Expr::null()));

            let replica_element = replica.type_args().first().cloned().unwrap_or_else(TypeRef::object);
            // Iterator based so sets and plain collections convert like lists.
            let iterator = Local::new(
                format!("{name}Iterator"),
                TypeRef::parameterized("java.util.Iterator", vec![replica_element.clone()]),
            );
            let fill = Stmt::block([
                local.assign(TypeRef::class(kind.implementation()).instantiate(Vec::new())),
                iterator.define(source.invoke("iterator", iterator.ty.clone(), Vec::new())),
                Stmt::while_loop(
                    iterator.invoke("hasNext", TypeRef::boolean(), Vec::new()),
                    local
                        .invoke(
                            "add",
                            TypeRef::boolean(),
                            vec![Expr::This.invoke(
                                converter.clone(),
                                element.clone(),
                                vec![iterator.invoke("next", replica_element, Vec::new())],
                            )],
                        )
                        .into(),
                ),
            ]);
            statements.push(Stmt::if_then(source.expr().is_not_null(), fill));
            local.expr()
        }
    }
}
