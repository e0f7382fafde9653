// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC entity attribute values and their STEP encoding.

use crate::document::EntityId;
use std::fmt::Write;

/// IFC entity attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Entity reference
    EntityRef(EntityId),
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// Enum value, written as `.NAME.`
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value such as `IFCLABEL('x')`
    Typed(&'static str, Box<AttributeValue>),
    /// Null/undefined
    Null,
    /// Derived value (*)
    Derived,
}

impl AttributeValue {
    pub fn string(s: impl Into<String>) -> Self {
        AttributeValue::String(s.into())
    }

    /// String attribute, `$` when absent
    pub fn opt_string(s: Option<&str>) -> Self {
        s.map(Self::string).unwrap_or(AttributeValue::Null)
    }

    pub fn enumeration(name: &str) -> Self {
        AttributeValue::Enum(name.to_string())
    }

    /// STEP logical: `.T.` or `.F.`
    pub fn boolean(value: bool) -> Self {
        AttributeValue::Enum(if value { "T" } else { "F" }.to_string())
    }

    pub fn typed(type_name: &'static str, inner: AttributeValue) -> Self {
        AttributeValue::Typed(type_name, Box::new(inner))
    }

    pub fn refs(ids: impl IntoIterator<Item = EntityId>) -> Self {
        AttributeValue::List(ids.into_iter().map(AttributeValue::EntityRef).collect())
    }

    pub fn floats(values: impl IntoIterator<Item = f64>) -> Self {
        AttributeValue::List(values.into_iter().map(AttributeValue::Float).collect())
    }

    /// Get as entity reference
    #[inline]
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Get as string
    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as float
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as list
    #[inline]
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if null/derived
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null | AttributeValue::Derived)
    }

    /// Append the STEP encoding of this value to `out`
    pub fn write_step(&self, out: &mut String) {
        match self {
            AttributeValue::EntityRef(id) => {
                let _ = write!(out, "{}", id);
            }
            AttributeValue::String(s) => {
                out.push('\'');
                encode_step_string(s, out);
                out.push('\'');
            }
            AttributeValue::Integer(i) => {
                let _ = write!(out, "{}", i);
            }
            AttributeValue::Float(f) => write_step_real(*f, out),
            AttributeValue::Enum(e) => {
                out.push('.');
                out.push_str(e);
                out.push('.');
            }
            AttributeValue::List(items) => {
                out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_step(out);
                }
                out.push(')');
            }
            AttributeValue::Typed(name, inner) => {
                out.push_str(name);
                out.push('(');
                inner.write_step(out);
                out.push(')');
            }
            AttributeValue::Null => out.push('$'),
            AttributeValue::Derived => out.push('*'),
        }
    }
}

impl From<EntityId> for AttributeValue {
    fn from(id: EntityId) -> Self {
        AttributeValue::EntityRef(id)
    }
}

impl From<Option<EntityId>> for AttributeValue {
    fn from(id: Option<EntityId>) -> Self {
        id.map(AttributeValue::EntityRef).unwrap_or(AttributeValue::Null)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

/// STEP REAL: always carries a decimal point, e.g. `0.` or `12.5`
fn write_step_real(value: f64, out: &mut String) {
    if !value.is_finite() {
        out.push('$');
        return;
    }
    let start = out.len();
    let _ = write!(out, "{}", value);
    if !out[start..].contains('.') {
        out.push('.');
    }
}

/// Escape a string for a STEP literal.
///
/// Quotes and backslashes are doubled; characters outside printable ASCII
/// are written as `\X2\` UTF-16 hex runs.
fn encode_step_string(s: &str, out: &mut String) {
    let mut in_x2 = false;
    for c in s.chars() {
        let printable = (' '..='~').contains(&c);
        if !printable {
            if !in_x2 {
                out.push_str("\\X2\\");
                in_x2 = true;
            }
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                let _ = write!(out, "{:04X}", unit);
            }
            continue;
        }
        if in_x2 {
            out.push_str("\\X0\\");
            in_x2 = false;
        }
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    if in_x2 {
        out.push_str("\\X0\\");
    }
}
