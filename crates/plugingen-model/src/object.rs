//! Object definitions: the top-level and nested types handed to the emitter.

use serde::Serialize;

use crate::body::{Expr, Stmt};
use crate::types::{simple_name, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationDef {
    pub ty: TypeRef,
    pub members: Vec<(String, Expr)>,
}

impl AnnotationDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ty: TypeRef::class(name),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.members.push((name.into(), value.into()));
        self
    }

    pub fn member(&self, name: &str) -> Option<&Expr> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }

    pub fn name(&self) -> &str {
        self.ty.name().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationDef>,
    pub javadoc: Option<String>,
    pub initializer: Option<Expr>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
            initializer: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationDef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationDef> {
        find_annotation(&self.annotations, name)
    }
}

/// A bean property: the emitter renders a private field plus accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationDef>,
    pub javadoc: Option<String>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDef {
    pub name: String,
    pub ty: TypeRef,
}

impl ParameterDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn expr(&self) -> Expr {
        Expr::param(self.name.clone(), self.ty.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDef {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationDef>,
    pub javadoc: Option<String>,
    pub parameters: Vec<ParameterDef>,
    pub returns: TypeRef,
    pub overrides: bool,
    /// `None` for abstract and interface methods.
    pub body: Option<Stmt>,
}

impl MethodDef {
    pub const CONSTRUCTOR: &'static str = "<init>";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
            parameters: Vec::new(),
            returns: TypeRef::Void,
            overrides: false,
            body: None,
        }
    }

    pub fn constructor() -> Self {
        Self::new(Self::CONSTRUCTOR)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == Self::CONSTRUCTOR
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(&Modifier::Abstract)
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = ty;
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDef::new(name, ty));
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationDef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Finishes the method with a body built from its parameter expressions.
    pub fn build(self, body: impl FnOnce(&[Expr]) -> Stmt) -> Self {
        match self.try_build(|params| Ok::<_, std::convert::Infallible>(body(params))) {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`MethodDef::build`].
    pub fn try_build<E>(mut self, body: impl FnOnce(&[Expr]) -> Result<Stmt, E>) -> Result<Self, E> {
        let params: Vec<Expr> = self.parameters.iter().map(ParameterDef::expr).collect();
        self.body = Some(body(&params)?);
        Ok(self)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationDef> {
        find_annotation(&self.annotations, name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDef {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationDef>,
    pub javadoc: Option<String>,
    pub superclass: Option<TypeRef>,
    pub superinterfaces: Vec<TypeRef>,
    pub fields: Vec<FieldDef>,
    pub properties: Vec<PropertyDef>,
    pub methods: Vec<MethodDef>,
    pub inner: Vec<ObjectDef>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
            superclass: None,
            superinterfaces: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationDef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn with_superclass(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_superinterface(mut self, ty: TypeRef) -> Self {
        self.superinterfaces.push(ty);
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodDef>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn with_inner(mut self, inner: impl Into<ObjectDef>) -> Self {
        self.inner.push(inner.into());
        self
    }

    /// Adds a constructor taking every property and every uninitialised instance field,
    /// in declaration order, and assigning each to `this`.
    pub fn with_all_fields_constructor(self, modifiers: &[Modifier]) -> Self {
        let mut params: Vec<ParameterDef> = self
            .properties
            .iter()
            .map(|p| ParameterDef::new(p.name.clone(), p.ty.clone()))
            .collect();
        params.extend(
            self.fields
                .iter()
                .filter(|f| f.initializer.is_none() && !f.modifiers.contains(&Modifier::Static))
                .map(|f| ParameterDef::new(f.name.clone(), f.ty.clone())),
        );

        let mut constructor = MethodDef::constructor().with_modifiers(modifiers);
        for param in &params {
            constructor = constructor.with_parameter(param.name.clone(), param.ty.clone());
        }
        let constructor = constructor.build(|args| {
            Stmt::block(params.iter().zip(args).map(|(param, arg)| {
                Stmt::assign_field(Expr::This, param.name.clone(), param.ty.clone(), arg.clone())
            }))
        });
        self.with_method(constructor)
    }

    /// Adds a constructor with the given parameters and an empty body.
    pub fn with_constructor(self, params: Vec<ParameterDef>, modifiers: &[Modifier]) -> Self {
        let mut constructor = MethodDef::constructor().with_modifiers(modifiers);
        constructor.parameters = params;
        let constructor = constructor.build(|_| Stmt::block([]));
        self.with_method(constructor)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.is_constructor())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDef {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationDef>,
    pub javadoc: Option<String>,
    pub superinterfaces: Vec<TypeRef>,
    pub properties: Vec<PropertyDef>,
    pub methods: Vec<MethodDef>,
    pub inner: Vec<ObjectDef>,
}

impl InterfaceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
            superinterfaces: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn with_superinterface(mut self, ty: TypeRef) -> Self {
        self.superinterfaces.push(ty);
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub javadoc: Option<String>,
    pub superinterfaces: Vec<TypeRef>,
    pub constants: Vec<String>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    pub inner: Vec<ObjectDef>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            javadoc: None,
            superinterfaces: Vec::new(),
            constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_javadoc(mut self, javadoc: impl Into<String>) -> Self {
        self.javadoc = Some(javadoc.into());
        self
    }

    pub fn with_constant(mut self, constant: impl Into<String>) -> Self {
        self.constants.push(constant.into());
        self
    }
}

/// A generated type: the unit handed to the emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectDef {
    Class(ClassDef),
    Interface(InterfaceDef),
    Enum(EnumDef),
}

impl ObjectDef {
    pub fn name(&self) -> &str {
        match self {
            ObjectDef::Class(def) => &def.name,
            ObjectDef::Interface(def) => &def.name,
            ObjectDef::Enum(def) => &def.name,
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(self.name())
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectDef::Class(_) => ObjectKind::Class,
            ObjectDef::Interface(_) => ObjectKind::Interface,
            ObjectDef::Enum(_) => ObjectKind::Enum,
        }
    }

    pub fn javadoc(&self) -> Option<&str> {
        match self {
            ObjectDef::Class(def) => def.javadoc.as_deref(),
            ObjectDef::Interface(def) => def.javadoc.as_deref(),
            ObjectDef::Enum(def) => def.javadoc.as_deref(),
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            ObjectDef::Class(def) => &def.modifiers,
            ObjectDef::Interface(def) => &def.modifiers,
            ObjectDef::Enum(def) => &def.modifiers,
        }
    }

    pub fn methods(&self) -> &[MethodDef] {
        match self {
            ObjectDef::Class(def) => &def.methods,
            ObjectDef::Interface(def) => &def.methods,
            ObjectDef::Enum(def) => &def.methods,
        }
    }

    pub fn inner(&self) -> &[ObjectDef] {
        match self {
            ObjectDef::Class(def) => &def.inner,
            ObjectDef::Interface(def) => &def.inner,
            ObjectDef::Enum(def) => &def.inner,
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods().iter().find(|m| m.name == name)
    }

    pub fn inner_type(&self, simple: &str) -> Option<&ObjectDef> {
        self.inner().iter().find(|o| o.simple_name() == simple)
    }

    pub fn as_class(&self) -> Option<&ClassDef> {
        match self {
            ObjectDef::Class(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceDef> {
        match self {
            ObjectDef::Interface(def) => Some(def),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDef> {
        match self {
            ObjectDef::Enum(def) => Some(def),
            _ => None,
        }
    }

    /// Reference to this definition from other generated code.
    pub fn as_type_ref(&self) -> TypeRef {
        TypeRef::Generated {
            name: self.name().to_string(),
            kind: self.kind(),
        }
    }
}

impl From<ClassDef> for ObjectDef {
    fn from(def: ClassDef) -> Self {
        ObjectDef::Class(def)
    }
}

impl From<InterfaceDef> for ObjectDef {
    fn from(def: InterfaceDef) -> Self {
        ObjectDef::Interface(def)
    }
}

impl From<EnumDef> for ObjectDef {
    fn from(def: EnumDef) -> Self {
        ObjectDef::Enum(def)
    }
}

fn has_annotation(annotations: &[AnnotationDef], name: &str) -> bool {
    find_annotation(annotations, name).is_some()
}

// Matches either the qualified or the simple annotation name.
fn find_annotation<'a>(annotations: &'a [AnnotationDef], name: &str) -> Option<&'a AnnotationDef> {
    annotations
        .iter()
        .find(|a| a.name() == name || simple_name(a.name()) == simple_name(name))
}
