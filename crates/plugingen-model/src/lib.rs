//! Language-neutral intermediate representation for generated build-plugin sources.
//!
//! Builders in `plugingen` produce [`ObjectDef`] trees: classes, interfaces and enums
//! with fields, properties, annotations and methods whose bodies are [`Stmt`] /
//! [`Expr`] trees. Rendering to source text is left to an emitter.

mod body;
pub mod naming;
mod object;
mod types;

pub use body::{CompareOp, Expr, Literal, Local, MathOp, Stmt};
pub use object::{
    AnnotationDef, ClassDef, EnumDef, FieldDef, InterfaceDef, MethodDef, Modifier, ObjectDef,
    ObjectKind, ParameterDef, PropertyDef,
};
pub use types::{package_name, simple_name, Primitive, TypeRef};
