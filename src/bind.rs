//! Query-binding parameters as seen by a SQL logger.

use std::fmt;

/// Column type of a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// Character data
    Text,
    /// Integer
    Integer,
    /// Floating point
    Float,
    /// Boolean
    Boolean,
    /// Raw bytes. Never rendered verbatim in logs.
    Binary,
}

impl ParamType {
    /// Returns `true` for binary column types.
    pub fn is_binary(self) -> bool {
        matches!(self, ParamType::Binary)
    }
}

/// The value substituted for a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// SQL NULL
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Byte string
    Bytes(Vec<u8>),
}

impl ParamValue {
    /// Returns `true` for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Size of the value as sent to the database, in bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            ParamValue::Null => 0,
            ParamValue::Text(s) => s.len(),
            ParamValue::Bytes(b) => b.len(),
            other => other.to_string().len(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => f.write_str("NULL"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Boolean(b) => write!(f, "{}", b),
            ParamValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// A named, typed value bound into a query template.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    /// Column or placeholder name
    pub name: String,
    /// Column type
    pub param_type: ParamType,
    /// Bound value
    pub value: ParamValue,
}

impl BoundParameter {
    /// Creates a bound parameter.
    pub fn new(name: impl Into<String>, param_type: ParamType, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            param_type,
            value,
        }
    }

    /// Shorthand for a text parameter.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ParamType::Text, ParamValue::Text(value.into()))
    }

    /// Shorthand for a binary parameter.
    pub fn binary(name: impl Into<String>, value: Vec<u8>) -> Self {
        Self::new(name, ParamType::Binary, ParamValue::Bytes(value))
    }
}

/// A bind as handed to the logger: a single parameter, or a list-shaped
/// wrapper whose first element names the column.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    /// One parameter
    Parameter(BoundParameter),
    /// A list wrapper; only the first element is rendered
    List(Vec<BoundParameter>),
}

impl Bind {
    /// Returns the parameter that should be rendered.
    pub fn primary(&self) -> Option<&BoundParameter> {
        match self {
            Bind::Parameter(param) => Some(param),
            Bind::List(params) => params.first(),
        }
    }
}

impl From<BoundParameter> for Bind {
    fn from(param: BoundParameter) -> Self {
        Bind::Parameter(param)
    }
}

/// A bind after redaction, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBind {
    /// Parameter name, absent for an empty list wrapper
    pub name: Option<String>,
    /// Display value
    pub value: String,
}

/// Hook a SQL logger calls once per bound parameter before writing a line.
pub trait RenderBind {
    /// Renders `bind` for display.
    fn render_bind(&self, bind: &Bind) -> RenderedBind;
}
