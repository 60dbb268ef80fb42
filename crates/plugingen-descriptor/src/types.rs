use std::fmt;
use std::str::FromStr;

use plugingen_model::{Primitive, TypeRef};
use serde::{Deserialize, Serialize};

/// A source type as written in a descriptor: a qualified raw name plus type arguments.
///
/// Serialized as its display form, e.g. `java.util.Map<java.lang.String, java.lang.String>`.
/// Wildcards are named `?` and keep their bound, if any, as the single argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JavaType {
    pub name: String,
    pub args: Vec<JavaType>,
    /// Number of `[]` suffixes.
    pub dimensions: usize,
    /// `? super X` rather than `? extends X`.
    pub lower_bound: bool,
}

const WILDCARD: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid type `{input}`: {message}")]
pub struct ParseTypeError {
    pub input: String,
    pub message: &'static str,
}

impl JavaType {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_args(name, Vec::new())
    }

    pub fn with_args(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        Self {
            name: name.into(),
            args,
            dimensions: 0,
            lower_bound: false,
        }
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }

    pub fn primitive(&self) -> Option<Primitive> {
        if self.is_array() {
            return None;
        }
        Primitive::from_keyword(&self.name)
    }

    pub fn is_file(&self) -> bool {
        !self.is_array() && self.name == "java.io.File"
    }

    pub fn is_string(&self) -> bool {
        !self.is_array() && self.name == "java.lang.String"
    }

    pub fn is_map(&self) -> bool {
        !self.is_array() && is_map(&self.name)
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        if self.is_array() {
            return None;
        }
        CollectionKind::of(&self.name)
    }

    /// Binary simple name, e.g. `Outer$Inner` for a nested type.
    pub fn simple_name(&self) -> &str {
        plugingen_model::simple_name(&self.name)
    }

    pub fn package_name(&self) -> &str {
        plugingen_model::package_name(&self.name)
    }

    pub fn to_type_ref(&self) -> TypeRef {
        if self.is_wildcard() {
            let bound = self
                .args
                .first()
                .map(JavaType::to_type_ref)
                .unwrap_or_else(TypeRef::object);
            return if self.lower_bound {
                TypeRef::wildcard_super(bound)
            } else {
                TypeRef::wildcard_extends(bound)
            };
        }
        let mut ty = if self.is_void() {
            TypeRef::Void
        } else if let Some(primitive) = Primitive::from_keyword(&self.name) {
            TypeRef::Primitive(primitive)
        } else if self.args.is_empty() {
            TypeRef::class(self.name.clone())
        } else {
            TypeRef::parameterized(
                self.name.clone(),
                self.args.iter().map(JavaType::to_type_ref).collect(),
            )
        };
        for _ in 0..self.dimensions {
            ty = TypeRef::array(ty);
        }
        ty
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wildcard() {
            f.write_str(WILDCARD)?;
            if let Some(bound) = self.args.first() {
                let keyword = if self.lower_bound { "super" } else { "extends" };
                write!(f, " {keyword} {bound}")?;
            }
            return Ok(());
        }
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (idx, arg) in self.args.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for JavaType {
    type Err = ParseTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos != input.len() {
            return Err(parser.error("trailing characters"));
        }
        Ok(ty)
    }
}

impl TryFrom<String> for JavaType {
    type Error = ParseTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JavaType> for String {
    fn from(ty: JavaType) -> Self {
        ty.to_string()
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn parse_type(&mut self) -> Result<JavaType, ParseTypeError> {
        self.skip_ws();
        if self.peek() == Some('?') {
            self.pos += 1;
            return self.parse_wildcard();
        }
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || matches!(ch, '.' | '_' | '$') {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        if start == self.pos {
            return Err(self.error("expected a type name"));
        }
        let name = self.input[start..self.pos].to_string();

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error("unclosed type arguments")),
                }
            }
        }

        let mut ty = JavaType::with_args(name, args);
        loop {
            self.skip_ws();
            if !self.input[self.pos..].starts_with('[') {
                break;
            }
            self.pos += 1;
            self.skip_ws();
            if self.peek() != Some(']') {
                return Err(self.error("unclosed array brackets"));
            }
            self.pos += 1;
            ty.dimensions += 1;
        }
        Ok(ty)
    }

    /// After `?`: nothing, `extends T` or `super T`.
    fn parse_wildcard(&mut self) -> Result<JavaType, ParseTypeError> {
        let mut ty = JavaType::new(WILDCARD);
        self.skip_ws();
        let rest = &self.input[self.pos..];
        let lower_bound = if rest.starts_with("extends") {
            self.pos += "extends".len();
            false
        } else if rest.starts_with("super") {
            self.pos += "super".len();
            true
        } else {
            return Ok(ty);
        };
        if !self.peek().is_some_and(char::is_whitespace) {
            return Err(self.error("expected a wildcard bound"));
        }
        ty.lower_bound = lower_bound;
        ty.args.push(self.parse_type()?);
        Ok(ty)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn error(&self, message: &'static str) -> ParseTypeError {
        ParseTypeError {
            input: self.input.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    List,
    Set,
}

impl CollectionKind {
    pub fn of(raw: &str) -> Option<Self> {
        match raw {
            "java.util.List" | "java.util.ArrayList" | "java.util.LinkedList"
            | "java.util.Collection" => Some(CollectionKind::List),
            "java.util.Set" | "java.util.HashSet" | "java.util.LinkedHashSet"
            | "java.util.SortedSet" | "java.util.TreeSet" => Some(CollectionKind::Set),
            _ => None,
        }
    }

    /// Concrete implementation instantiated by generated conversion code.
    pub fn implementation(self) -> &'static str {
        match self {
            CollectionKind::List => "java.util.ArrayList",
            CollectionKind::Set => "java.util.HashSet",
        }
    }
}

fn is_map(raw: &str) -> bool {
    matches!(
        raw,
        "java.util.Map"
            | "java.util.HashMap"
            | "java.util.LinkedHashMap"
            | "java.util.SortedMap"
            | "java.util.TreeMap"
    )
}

/// How the generator treats a source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    Void,
    Primitive(Primitive),
    Enum,
    Pojo,
    Collection {
        kind: CollectionKind,
        element: JavaType,
    },
    Map,
    /// Strings, boxed primitives, files and anything the provider cannot load.
    Passthrough,
}

impl TypeClass {
    /// Enums and POJOs are copied into the generated model package.
    pub fn is_model(&self) -> bool {
        matches!(self, TypeClass::Enum | TypeClass::Pojo)
    }
}
