use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::error::{ArgError, Result};
use crate::registry::SpecId;

/// Where a [`ResultEntry`]'s value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Given on the command line.
    Input,
    /// Synthesized by validation for an omitted optional argument or flag.
    Default,
    /// The trailing positional token.
    Final,
}

/// One resolved argument: the spec it belongs to and its raw string value.
///
/// Values are stored as given and converted on read. Flags hold the literal
/// `"true"` or `"false"`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResultEntry {
    name: String,
    #[serde(skip)]
    spec: SpecId,
    value: String,
    origin: Origin,
}

impl ResultEntry {
    pub(crate) fn new(name: &str, spec: SpecId, value: impl Into<String>, origin: Origin) -> Self {
        Self {
            name: name.to_string(),
            spec,
            value: value.into(),
            origin,
        }
    }

    /// Canonical name of the argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> SpecId {
        self.spec
    }

    /// The raw stored value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Whether the value was typed by the user rather than synthesized.
    pub fn is_explicit(&self) -> bool {
        self.origin != Origin::Default
    }

    pub fn as_str<'a>(&'a self, default: &'a str) -> &'a str {
        if self.value.is_empty() {
            default
        } else {
            &self.value
        }
    }

    /// Parse the stored value with `FromStr`, or return `default` when empty.
    pub fn parse_or<T>(&self, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        if self.value.is_empty() {
            return Ok(default);
        }
        self.value.parse::<T>().map_err(|e| ArgError::Conversion {
            name: self.name.clone(),
            value: self.value.clone(),
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }

    pub fn as_i32(&self, default: i32) -> Result<i32> {
        self.parse_or(default)
    }

    pub fn as_i64(&self, default: i64) -> Result<i64> {
        self.parse_or(default)
    }

    pub fn as_f32(&self, default: f32) -> Result<f32> {
        self.parse_or(default)
    }

    pub fn as_f64(&self, default: f64) -> Result<f64> {
        self.parse_or(default)
    }

    /// `true` only for the exact strings `"true"` and `"yes"`; any other
    /// non-empty value reads as `false`.
    pub fn as_bool(&self, default: bool) -> bool {
        if self.value.is_empty() {
            return default;
        }
        self.value == "true" || self.value == "yes"
    }
}

/// Resolved arguments keyed by canonical name, in the order they were
/// resolved: command-line order first, then validator defaults.
///
/// After a failed parse the contents are incomplete and should not be read.
#[derive(Debug, Clone, Default)]
pub struct ParseResults {
    entries: IndexMap<String, ResultEntry>,
}

impl ParseResults {
    /// Look up an entry by canonical name (aliases are not keys here).
    pub fn get(&self, name: &str) -> Result<&ResultEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| ArgError::MissingArgument(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Store an entry. A name that is already present keeps its first value.
    pub(crate) fn insert(&mut self, entry: ResultEntry) {
        match self.entries.entry(entry.name.clone()) {
            indexmap::map::Entry::Occupied(prev) => {
                tracing::debug!(
                    name = %entry.name,
                    kept = %prev.get().value,
                    ignored = %entry.value,
                    "argument given more than once, keeping first value"
                );
            }
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(entry);
            }
        }
    }
}

impl Serialize for ParseResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'a> IntoIterator for &'a ParseResults {
    type Item = &'a ResultEntry;
    type IntoIter = indexmap::map::Values<'a, String, ResultEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str) -> ResultEntry {
        ResultEntry::new("--threads", SpecId::Named(0), value, Origin::Input)
    }

    #[test]
    fn empty_value_yields_defaults_without_conversion() {
        let e = entry("");
        assert_eq!(e.as_str("fallback"), "fallback");
        assert_eq!(e.as_i32(7).unwrap(), 7);
        assert_eq!(e.as_i64(-3).unwrap(), -3);
        assert_eq!(e.as_f32(1.5).unwrap(), 1.5);
        assert_eq!(e.as_f64(2.25).unwrap(), 2.25);
        assert!(e.as_bool(true));
    }

    #[test]
    fn numeric_readers_convert() {
        assert_eq!(entry("12").as_i32(0).unwrap(), 12);
        assert_eq!(entry("-9000000000").as_i64(0).unwrap(), -9_000_000_000);
        assert_eq!(entry("0.5").as_f64(0.0).unwrap(), 0.5);
        assert_eq!(entry("0.25").as_f32(0.0).unwrap(), 0.25);
    }

    #[test]
    fn non_numeric_value_is_a_conversion_error() {
        match entry("abc").as_i32(0).unwrap_err() {
            ArgError::Conversion { name, value, .. } => {
                assert_eq!(name, "--threads");
                assert_eq!(value, "abc");
            }
            other => panic!("expected Conversion, got: {other:?}"),
        }
        assert!(entry("1.5").as_i64(0).is_err());
    }

    #[test]
    fn bool_reader_accepts_true_and_yes_only() {
        assert!(entry("true").as_bool(false));
        assert!(entry("yes").as_bool(false));
        assert!(!entry("TRUE").as_bool(true));
        assert!(!entry("1").as_bool(true));
        assert!(!entry("false").as_bool(true));
    }

    #[test]
    fn repeated_insert_keeps_first_value() {
        let mut results = ParseResults::default();
        results.insert(ResultEntry::new("--a", SpecId::Named(0), "1", Origin::Input));
        results.insert(ResultEntry::new("--b", SpecId::Named(1), "2", Origin::Input));
        results.insert(ResultEntry::new("--a", SpecId::Named(0), "3", Origin::Input));

        let names: Vec<&str> = results.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["--a", "--b"]);
        assert_eq!(results.get("--a").unwrap().value(), "1");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn missing_name_is_missing_argument() {
        let results = ParseResults::default();
        match results.get("--nope").unwrap_err() {
            ArgError::MissingArgument(key) => assert_eq!(key, "--nope"),
            other => panic!("expected MissingArgument, got: {other:?}"),
        }
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut results = ParseResults::default();
        results.insert(ResultEntry::new("--input", SpecId::Named(0), "a.txt", Origin::Input));
        results.insert(ResultEntry::new("--colour", SpecId::Named(1), "false", Origin::Default));
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "--input", "value": "a.txt", "origin": "input"},
                {"name": "--colour", "value": "false", "origin": "default"},
            ])
        );
    }
}
