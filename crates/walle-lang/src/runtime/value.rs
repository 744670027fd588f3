use std::fmt;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_)   => "string",
            Value::Bool(_)   => "bool",
        }
    }

    /// Numeric context: booleans widen to 1/0, text has no number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b)   => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(_)   => None,
        }
    }

    /// Numeric value rounded half away from zero, saturating at the i64 range.
    pub fn as_int(&self) -> Option<i64> {
        self.as_number().map(|n| n.round() as i64)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Bool(b)   => *b,
            Value::Text(s)   => !s.is_empty(),
        }
    }

    /// Text equals text; everything else compares numerically.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Text(_), _) | (_, Value::Text(_)) => false,
            _ => self.as_number() == other.as_number(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s)   => write!(f, "{s:?}"),
            Value::Bool(b)   => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(n as f64) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}
