// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::TARGET_PATH_KEY;
use pbxsign_core::{Error, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Value of a single request option.
///
/// Only scalars take part in signing and in the query string or body.
/// [`OptionValue::Map`] entries, and floats that are NaN or infinite, are
/// carried along but skipped everywhere.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` / `false`
    Bool(bool),
    /// Signed integer, rendered in decimal.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`, rendered in decimal.
    Unsigned(u64),
    /// Float, rendered with a trailing `.0` when integral.
    Float(f64),
    /// String, rendered verbatim.
    String(String),
    /// Nested mapping, never rendered.
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Returns true if the value is rendered on the wire.
    pub fn is_scalar(&self) -> bool {
        match self {
            OptionValue::Float(v) => v.is_finite(),
            OptionValue::Map(_) => false,
            _ => true,
        }
    }

    /// Borrow the inner string if this is a [`OptionValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Render a scalar the way it appears on the wire.
    ///
    /// Returns `None` for mappings and for non-finite floats.
    pub fn to_scalar_string(&self) -> Option<Cow<'_, str>> {
        match self {
            OptionValue::Bool(v) => Some(Cow::Borrowed(if *v { "true" } else { "false" })),
            OptionValue::Integer(v) => Some(Cow::Owned(v.to_string())),
            OptionValue::Unsigned(v) => Some(Cow::Owned(v.to_string())),
            OptionValue::Float(v) if v.is_finite() => Some(Cow::Owned(format!("{v:?}"))),
            OptionValue::Float(_) => None,
            OptionValue::String(v) => Some(Cow::Borrowed(v)),
            OptionValue::Map(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Integer(v.into())
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        OptionValue::Integer(v.into())
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Integer(v)
    }
}

impl From<u64> for OptionValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => OptionValue::Integer(v),
            Err(_) => OptionValue::Unsigned(v),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<RequestOptions> for OptionValue {
    fn from(v: RequestOptions) -> Self {
        OptionValue::Map(v.0)
    }
}

/// Options of a single request, ordered by key.
///
/// Keys are kept in a [`BTreeMap`] so iteration is always ascending in byte
/// order, which is the order both the canonical string and the query string
/// require.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RequestOptions(BTreeMap<String, OptionValue>);

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option and return self.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option, returning the previous value under the same key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Get an option by key.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Remove an option by key.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.0.remove(key)
    }

    /// Number of options, mappings included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate rendered scalar options in ascending key order.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.to_scalar_string().map(|v| (k.as_str(), v)))
    }

    /// Take the target path out of the reserved `url` option.
    ///
    /// Fails with [`pbxsign_core::ErrorKind::ParameterMissing`] if the option
    /// is absent, empty or not a string. The options are left untouched on failure.
    pub fn take_target_path(&mut self) -> Result<String> {
        match self.0.remove(TARGET_PATH_KEY) {
            Some(OptionValue::String(v)) if !v.is_empty() => Ok(v),
            other => {
                if let Some(v) = other {
                    self.0.insert(TARGET_PATH_KEY.to_string(), v);
                }
                Err(Error::parameter_missing(format!(
                    "`{TARGET_PATH_KEY}` option with the target path is required"
                )))
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RequestOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
