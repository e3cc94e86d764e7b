// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Normalization of wrapped wire numerics.
//!
//! The learning service persists run documents in a store whose JSON
//! export wraps numbers in `{"$numberDouble": "12.5"}` (and the int/long
//! variants). Step durations can arrive in any of these shapes; they are
//! normalized to a plain `f64` here, at the deserialization boundary,
//! so nothing downstream has to care.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A numeric field that tolerates plain numbers, numeric strings, and
/// extended-JSON wrapper objects. Serializes back as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireNumber(pub f64);

impl WireNumber {
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Extract a plain f64 from any of the accepted wire shapes.
    pub fn from_value(v: &Value) -> Option<f64> {
        match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            Value::Object(map) => {
                let inner = map
                    .get("$numberDouble")
                    .or_else(|| map.get("$numberInt"))
                    .or_else(|| map.get("$numberLong"))?;
                Self::from_value(inner)
            }
            _ => None,
        }
    }
}

impl From<f64> for WireNumber {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(de)?;
        WireNumber::from_value(&value)
            .map(WireNumber)
            .ok_or_else(|| serde::de::Error::custom("expected a number, numeric string, or $number wrapper"))
    }
}

#[cfg(test)]
#[path = "wire_num_tests.rs"]
mod tests;
