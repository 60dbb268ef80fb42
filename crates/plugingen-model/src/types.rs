use std::fmt;

use serde::Serialize;

use crate::body::Expr;
use crate::object::ObjectKind;

/// Primitive JVM types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "short" => Primitive::Short,
            "char" => Primitive::Char,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Char => "char",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// The `java.lang` wrapper class for this primitive.
    pub fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "java.lang.Boolean",
            Primitive::Byte => "java.lang.Byte",
            Primitive::Short => "java.lang.Short",
            Primitive::Char => "java.lang.Character",
            Primitive::Int => "java.lang.Integer",
            Primitive::Long => "java.lang.Long",
            Primitive::Float => "java.lang.Float",
            Primitive::Double => "java.lang.Double",
        }
    }

    /// Reverse of [`Primitive::boxed_name`].
    pub fn unboxed(class_name: &str) -> Option<Self> {
        [
            Primitive::Boolean,
            Primitive::Byte,
            Primitive::Short,
            Primitive::Char,
            Primitive::Int,
            Primitive::Long,
            Primitive::Float,
            Primitive::Double,
        ]
        .into_iter()
        .find(|p| p.boxed_name() == class_name)
    }
}

/// A reference to a type from generated code.
///
/// `Class` names are written as given: fully qualified for top-level types, simple for
/// nested types referenced from inside their owner. `Generated` points at an object
/// definition created during the same generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Void,
    Primitive(Primitive),
    Class(String),
    Parameterized { raw: String, args: Vec<TypeRef> },
    WildcardSuper(Box<TypeRef>),
    WildcardExtends(Box<TypeRef>),
    Array(Box<TypeRef>),
    Generated { name: String, kind: ObjectKind },
    /// The type currently being defined.
    This,
}

impl TypeRef {
    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Class(name.into())
    }

    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    pub fn wildcard_super(bound: TypeRef) -> Self {
        TypeRef::WildcardSuper(Box::new(bound))
    }

    pub fn wildcard_extends(bound: TypeRef) -> Self {
        TypeRef::WildcardExtends(Box::new(bound))
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn string() -> Self {
        TypeRef::class("java.lang.String")
    }

    pub fn object() -> Self {
        TypeRef::class("java.lang.Object")
    }

    pub fn class_literal() -> Self {
        TypeRef::class("java.lang.Class")
    }

    pub fn file() -> Self {
        TypeRef::class("java.io.File")
    }

    pub fn boolean() -> Self {
        TypeRef::Primitive(Primitive::Boolean)
    }

    pub fn int() -> Self {
        TypeRef::Primitive(Primitive::Int)
    }

    /// Name of the raw type, `None` for void, primitives, arrays, wildcards and `This`.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Class(name) | TypeRef::Generated { name, .. } => Some(name),
            TypeRef::Parameterized { raw, .. } => Some(raw),
            TypeRef::Void
            | TypeRef::Primitive(_)
            | TypeRef::WildcardSuper(_)
            | TypeRef::WildcardExtends(_)
            | TypeRef::Array(_)
            | TypeRef::This => None,
        }
    }

    pub fn simple_name(&self) -> Option<&str> {
        self.name().map(simple_name)
    }

    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// Whether the reference points at an enum created in this generation pass.
    pub fn is_generated_enum(&self) -> bool {
        matches!(
            self,
            TypeRef::Generated {
                kind: ObjectKind::Enum,
                ..
            }
        )
    }

    /// `new T(args...)`.
    pub fn instantiate(&self, args: Vec<Expr>) -> Expr {
        Expr::New {
            ty: self.clone(),
            args,
        }
    }

    /// `T.name(args...)`.
    pub fn invoke_static(&self, method: impl Into<String>, returns: TypeRef, args: Vec<Expr>) -> Expr {
        Expr::InvokeStatic {
            owner: self.clone(),
            method: method.into(),
            args,
            returns,
        }
    }

    /// `T.name`, also used for enum constants and `T.class`.
    pub fn static_field(&self, name: impl Into<String>, ty: TypeRef) -> Expr {
        Expr::StaticField {
            owner: self.clone(),
            name: name.into(),
            ty,
        }
    }

    /// `T.class`.
    pub fn class_ref(&self) -> Expr {
        self.static_field("class", TypeRef::class_literal())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Void => f.write_str("void"),
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Class(name) | TypeRef::Generated { name, .. } => f.write_str(name),
            TypeRef::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeRef::WildcardSuper(bound) => write!(f, "? super {bound}"),
            TypeRef::WildcardExtends(bound) => write!(f, "? extends {bound}"),
            TypeRef::Array(element) => write!(f, "{element}[]"),
            TypeRef::This => f.write_str("this"),
        }
    }
}

/// Last dot-separated segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Package part of a qualified name (empty for the default package).
pub fn package_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}
