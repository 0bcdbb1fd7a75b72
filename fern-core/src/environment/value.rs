use std::{fmt::Display, rc::Rc};

use crate::{
    parser::prelude::{BlockStatement, Identifier},
    utils::prelude::OutputIO
};

use super::environment::Env;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

pub type BuiltinFn = fn(&dyn OutputIO, Vec<Object>) -> Object;

#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    Null,
    Error(String),
    Return(Box<Object>),
    Function(Rc<Function>),
    Builtin(Builtin),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Integer(_) => ObjectKind::Integer,
            Self::Float(_) => ObjectKind::Float,
            Self::Boolean(_) => ObjectKind::Boolean,
            Self::String(_) => ObjectKind::String,
            Self::Array(_) => ObjectKind::Array,
            Self::Null => ObjectKind::Null,
            Self::Error(_) => ObjectKind::Error,
            Self::Return(_) => ObjectKind::Return,
            Self::Function(_) => ObjectKind::Function,
            Self::Builtin(_) => ObjectKind::Builtin,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Only `true` passes a condition.
    pub fn is_truthy(&self) -> bool {
        matches!(self, Self::Boolean(true))
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        if value { TRUE } else { FALSE }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Error(a), Self::Error(b)) => a == b,
            (Self::Return(a), Self::Return(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a.name == b.name,
            _ => false
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:.6}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Array(elements) => {
                let elements = elements.iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");

                write!(f, "[{elements}]")
            },
            Self::Null => write!(f, "null"),
            Self::Error(message) => write!(f, "ERROR: {message}"),
            Self::Return(value) => write!(f, "{value}"),
            Self::Function(_) => write!(f, "<fun>"),
            Self::Builtin(_) => write!(f, "<std fun>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Integer,
    Float,
    Boolean,
    String,
    Array,
    Null,
    Error,
    Return,
    Function,
    Builtin,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Array => "ARRAY",
            Self::Null => "NULL",
            Self::Error => "ERROR",
            Self::Return => "RETURN_VALUE",
            Self::Function => "FUNCTION",
            Self::Builtin => "BUILTIN",
        };

        write!(f, "{name}")
    }
}

/// User function closing over the environment it was defined in.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Env,
}

// The captured environment usually contains the function itself.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}
