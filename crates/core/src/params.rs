// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flat job-creation parameters for `POST isos`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter names understood by openQA (and the kiwi test distribution).
pub mod keys {
    pub const FLAVOR: &str = "FLAVOR";
    pub const DISTRI: &str = "DISTRI";
    pub const VERSION: &str = "VERSION";
    pub const ARCH: &str = "ARCH";
    pub const BUILD: &str = "BUILD";
    pub const PRODUCTDIR: &str = "PRODUCTDIR";
    pub const CASEDIR: &str = "CASEDIR";
    pub const NEEDLES_DIR: &str = "NEEDLES_DIR";
    pub const ISO_1_URL: &str = "ISO_1_URL";
    pub const HDD_1_URL: &str = "HDD_1_URL";
    pub const HDD_1_DECOMPRESS_URL: &str = "HDD_1_DECOMPRESS_URL";
    pub const QEMU_DISABLE_SNAPSHOTS: &str = "QEMU_DISABLE_SNAPSHOTS";
    pub const QEMURAM: &str = "QEMURAM";
    pub const UEFI: &str = "UEFI";
    pub const UEFI_PFLASH_CODE: &str = "UEFI_PFLASH_CODE";
    pub const UEFI_PFLASH_VARS: &str = "UEFI_PFLASH_VARS";

    /// Every key that can carry the image download URL.
    pub const DOWNLOAD_URL_KEYS: &[&str] = &[ISO_1_URL, HDD_1_URL, HDD_1_DECOMPRESS_URL];
}

/// A parameter value: openQA takes everything as text, but a few settings
/// (`UEFI`, `QEMURAM`, ...) are declared numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

/// Insertion-ordered mapping of parameter name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(IndexMap<String, ParamValue>);

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing (in place) any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Chained form of [`ParameterSet::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Drop `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.shift_remove(key)
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn extend_from(&mut self, other: &ParameterSet) {
        for (key, value) in other.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// The download URL keys present in this set (exactly one for composed sets).
    pub fn download_url_keys(&self) -> Vec<&'static str> {
        keys::DOWNLOAD_URL_KEYS.iter().copied().filter(|k| self.contains_key(k)).collect()
    }

    /// Stringified pairs, the form openQA receives them in.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0.iter().map(|(k, v)| (k.clone(), v.to_string())).collect()
    }
}

impl fmt::Display for ParameterSet {
    /// `KEY=value` pairs separated by spaces, as `openqa-cli` would take them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.0.iter() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
