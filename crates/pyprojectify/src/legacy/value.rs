//! Static values recovered from `setup.py` without executing it.

use std::fmt;

/// A value recovered from a Python expression by structural inspection alone.
///
/// Lists, tuples and sets all collapse into [`LiteralValue::List`]; dict
/// displays keep their insertion order in [`LiteralValue::Dict`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// The Python `None` literal.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<LiteralValue>),
    /// Key/value pairs in insertion order. Keys are unique.
    Dict(Vec<(LiteralValue, LiteralValue)>),
    /// A bare name with no known literal binding; holds the name itself.
    Symbol(String),
    /// An expression that cannot be determined without evaluating code.
    Unresolved,
}

impl LiteralValue {
    /// Build a dict, letting later duplicate keys replace earlier ones in place.
    pub fn dict(entries: impl IntoIterator<Item = (Self, Self)>) -> Self {
        let mut out: Vec<(Self, Self)> = Vec::new();
        for (key, value) in entries {
            if let Some(slot) = out.iter_mut().find(|(existing, _)| *existing == key) {
                slot.1 = value;
            } else {
                out.push((key, value));
            }
        }
        Self::Dict(out)
    }

    /// Whether this is `None` or could not be resolved.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::None | Self::Unresolved)
    }

    /// The text of a string or of an unbound symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a string key in a dict value.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Convert into a TOML value.
    ///
    /// TOML has no null, so `None` and unresolved values (at any depth)
    /// become empty strings.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            Self::None | Self::Unresolved => toml::Value::String(String::new()),
            Self::Bool(b) => toml::Value::Boolean(*b),
            Self::Int(i) => toml::Value::Integer(*i),
            Self::Float(f) => toml::Value::Float(*f),
            Self::Str(s) | Self::Symbol(s) => toml::Value::String(s.clone()),
            Self::List(items) => toml::Value::Array(items.iter().map(Self::to_toml).collect()),
            Self::Dict(entries) => toml::Value::Table(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_toml()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None | Self::Unresolved => Ok(()),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) | Self::Symbol(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dict(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
