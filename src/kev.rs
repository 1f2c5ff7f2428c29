//! Key/encoded-value serialization for OpenURL ContextObjects.
//!
//! OpenURL (Z39.88-2004) transports citation metadata as an ordered list
//! of `name=value` pairs, form-urlencoded and joined with `&`. Names may
//! repeat: a ContextObject legitimately carries one `rft_id` per
//! identifier and one `rft.au` per author, so this is a list, not a map.

use std::fmt;

use itertools::Itertools;
use url::form_urlencoded::byte_serialize;

/// An ordered list of OpenURL key/value pairs.
///
/// Pairs keep their insertion order and duplicate names are allowed.
/// Only values are encoded; names are emitted verbatim.
///
/// # Examples
///
/// ```
/// use coinspan::KevPairs;
///
/// let mut kev = KevPairs::new();
/// kev.push("ctx_ver", "Z39.88-2004");
/// kev.push("rft.atitle", "A Title & More");
/// assert_eq!(kev.encode(), "ctx_ver=Z39.88-2004&rft.atitle=A+Title+%26+More");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KevPairs {
    pairs: Vec<(&'static str, String)>,
}

impl KevPairs {
    /// Creates an empty pair list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. An absent source value belongs here too, as an
    /// empty string, when the field itself is always emitted.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.pairs.push((name, value.into()));
    }

    /// Append a pair only when the value is present and non-empty.
    pub fn push_nonempty(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(value) = value
            && !value.is_empty()
        {
            self.push(name, value);
        }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair has been appended.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Serialize to the OpenURL wire form: values form-urlencoded
    /// (space as `+`, reserved bytes percent-escaped), pairs joined
    /// with `&`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| {
                let encoded: String = byte_serialize(value.as_bytes()).collect();
                format!("{}={}", name, encoded)
            })
            .join("&")
    }
}

impl fmt::Display for KevPairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
