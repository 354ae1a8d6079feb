// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// An upstream field whose JSON type varies between restaurants and days.
///
/// Price values and visiting-hours sections arrive as strings, numbers, nested objects, or not at
/// all. Decoding keeps the shape instead of guessing a meaning for it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum Loose {
    Text(String),
    Number(f64),
    Structured(Value),
    #[default]
    Absent,
    /// A value that decoded fine but has no textual reading (booleans).
    Unrepresentable,
}

impl Loose {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// A short single-line reading of the value, if it has one.
    pub fn summary(&self) -> Option<String> {
        match self {
            Self::Text(text) => {
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                (!text.is_empty()).then_some(text)
            }
            Self::Number(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
            Self::Number(value) => Some(format!("{value:.2}")),
            Self::Structured(_) | Self::Absent | Self::Unrepresentable => None,
        }
    }
}

impl From<Value> for Loose {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(text) => Self::Text(text),
            Value::Number(number) => match number.as_f64() {
                Some(value) => Self::Number(value),
                None => Self::Unrepresentable,
            },
            Value::Bool(_) => Self::Unrepresentable,
            structured @ (Value::Array(_) | Value::Object(_)) => Self::Structured(structured),
        }
    }
}

/// Reads a JSON `null` as the type's default instead of failing the whole payload.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for Loose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary() {
            Some(summary) => f.write_str(&summary),
            None => f.write_str("—"),
        }
    }
}
