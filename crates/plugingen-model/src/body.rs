//! Statement / expression IR for generated method bodies.
//!
//! Nothing here executes. Builders assemble these trees and the emitter renders them.

use serde::Serialize;

use crate::types::TypeRef;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A local variable declared inside a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Local {
    pub name: String,
    pub ty: TypeRef,
}

impl Local {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// `T name = init;`
    pub fn define(&self, init: Expr) -> Stmt {
        Stmt::DefineLocal {
            local: self.clone(),
            init,
        }
    }

    /// `name = value;`
    pub fn assign(&self, value: Expr) -> Stmt {
        Stmt::AssignLocal {
            local: self.clone(),
            value,
        }
    }

    pub fn expr(&self) -> Expr {
        Expr::Local(self.clone())
    }

    pub fn invoke(&self, method: impl Into<String>, returns: TypeRef, args: Vec<Expr>) -> Expr {
        self.expr().invoke(method, returns, args)
    }
}

impl From<&Local> for Expr {
    fn from(local: &Local) -> Self {
        local.expr()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    This,
    Local(Local),
    Param {
        name: String,
        ty: TypeRef,
    },
    Field {
        receiver: Box<Expr>,
        name: String,
        ty: TypeRef,
    },
    StaticField {
        owner: TypeRef,
        name: String,
        ty: TypeRef,
    },
    Invoke {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
        returns: TypeRef,
    },
    InvokeStatic {
        owner: TypeRef,
        method: String,
        args: Vec<Expr>,
        returns: TypeRef,
    },
    New {
        ty: TypeRef,
        args: Vec<Expr>,
    },
    Compare {
        op: CompareOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Math {
        op: MathOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Not(Box<Expr>),
}

impl Expr {
    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Boolean(value))
    }

    pub fn int(value: i32) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    pub fn param(name: impl Into<String>, ty: TypeRef) -> Self {
        Expr::Param {
            name: name.into(),
            ty,
        }
    }

    pub fn invoke(self, method: impl Into<String>, returns: TypeRef, args: Vec<Expr>) -> Expr {
        Expr::Invoke {
            receiver: Box::new(self),
            method: method.into(),
            args,
            returns,
        }
    }

    pub fn field(self, name: impl Into<String>, ty: TypeRef) -> Expr {
        Expr::Field {
            receiver: Box::new(self),
            name: name.into(),
            ty,
        }
    }

    pub fn compare(self, op: CompareOp, rhs: Expr) -> Expr {
        Expr::Compare {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn math(self, op: MathOp, rhs: Expr) -> Expr {
        Expr::Math {
            op,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    pub fn is_null(self) -> Expr {
        self.compare(CompareOp::Equal, Expr::null())
    }

    pub fn is_not_null(self) -> Expr {
        self.compare(CompareOp::NotEqual, Expr::null())
    }

    pub fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }

    pub fn returning(self) -> Stmt {
        Stmt::Return(Some(self))
    }

    /// Defines a new local initialised with this expression.
    pub fn new_local(self, name: impl Into<String>, ty: TypeRef) -> (Local, Stmt) {
        let local = Local::new(name, ty);
        let stmt = local.define(self);
        (local, stmt)
    }

    /// Calls `f` for this expression and every nested sub-expression, pre-order.
    pub fn walk(&self, f: &mut dyn FnMut(&Expr)) {
        f(self);
        match self {
            Expr::Literal(_)
            | Expr::This
            | Expr::Local(_)
            | Expr::Param { .. }
            | Expr::StaticField { .. } => {}
            Expr::Field { receiver, .. } => receiver.walk(f),
            Expr::Invoke { receiver, args, .. } => {
                receiver.walk(f);
                for arg in args {
                    arg.walk(f);
                }
            }
            Expr::InvokeStatic { args, .. } | Expr::New { args, .. } => {
                for arg in args {
                    arg.walk(f);
                }
            }
            Expr::Compare { lhs, rhs, .. } | Expr::Math { lhs, rhs, .. } => {
                lhs.walk(f);
                rhs.walk(f);
            }
            Expr::Not(inner) => inner.walk(f),
        }
    }

    /// Method name when this is an instance or static invocation.
    pub fn invoked_method(&self) -> Option<&str> {
        match self {
            Expr::Invoke { method, .. } | Expr::InvokeStatic { method, .. } => Some(method),
            _ => None,
        }
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::string(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::boolean(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Expr(Expr),
    DefineLocal {
        local: Local,
        init: Expr,
    },
    AssignLocal {
        local: Local,
        value: Expr,
    },
    AssignField {
        receiver: Expr,
        name: String,
        ty: TypeRef,
        value: Expr,
    },
    If {
        cond: Expr,
        then: Box<Stmt>,
    },
    IfElse {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Throw(Expr),
    Block(Vec<Stmt>),
}

impl Stmt {
    pub fn block(statements: impl IntoIterator<Item = Stmt>) -> Stmt {
        Stmt::Block(statements.into_iter().collect())
    }

    pub fn if_then(cond: Expr, then: Stmt) -> Stmt {
        Stmt::If {
            cond,
            then: Box::new(then),
        }
    }

    pub fn if_else(cond: Expr, then: Stmt, otherwise: Stmt) -> Stmt {
        Stmt::IfElse {
            cond,
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// `receiver.name = value;`
    pub fn assign_field(receiver: Expr, name: impl Into<String>, ty: TypeRef, value: Expr) -> Stmt {
        Stmt::AssignField {
            receiver,
            name: name.into(),
            ty,
            value,
        }
    }

    pub fn while_loop(cond: Expr, body: Stmt) -> Stmt {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    /// Calls `f` for this statement and every nested statement, pre-order.
    pub fn walk(&self, f: &mut dyn FnMut(&Stmt)) {
        f(self);
        match self {
            Stmt::Expr(_)
            | Stmt::DefineLocal { .. }
            | Stmt::AssignLocal { .. }
            | Stmt::AssignField { .. }
            | Stmt::Return(_)
            | Stmt::Throw(_) => {}
            Stmt::If { then, .. } | Stmt::While { body: then, .. } => then.walk(f),
            Stmt::IfElse {
                then, otherwise, ..
            } => {
                then.walk(f);
                otherwise.walk(f);
            }
            Stmt::Block(statements) => {
                for stmt in statements {
                    stmt.walk(f);
                }
            }
        }
    }

    /// Calls `f` for every expression reachable from this statement tree.
    pub fn walk_exprs(&self, f: &mut dyn FnMut(&Expr)) {
        self.walk(&mut |stmt| match stmt {
            Stmt::Expr(expr) | Stmt::Throw(expr) | Stmt::Return(Some(expr)) => expr.walk(f),
            Stmt::DefineLocal { init: value, .. } | Stmt::AssignLocal { value, .. } => {
                value.walk(f)
            }
            Stmt::AssignField {
                receiver, value, ..
            } => {
                receiver.walk(f);
                value.walk(f);
            }
            Stmt::If { cond, .. } | Stmt::IfElse { cond, .. } | Stmt::While { cond, .. } => {
                cond.walk(f)
            }
            Stmt::Return(None) | Stmt::Block(_) => {}
        });
    }

    /// Names of every method invoked anywhere in this statement tree, in visit order.
    pub fn invoked_methods(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.walk_exprs(&mut |expr| {
            if let Some(method) = expr.invoked_method() {
                out.push(method.to_string());
            }
        });
        out
    }

    /// Top-level statements of a block, or the statement itself.
    pub fn flatten(&self) -> Vec<&Stmt> {
        match self {
            Stmt::Block(statements) => statements.iter().flat_map(Stmt::flatten).collect(),
            other => vec![other],
        }
    }
}

impl From<Expr> for Stmt {
    fn from(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }
}
