//! Per-domain conversion tables.
//!
//! A table holds one literal per enumeration value, in ordinal order. Values
//! that omit the domain get the domain's default literal. Literals are opaque
//! text: they are compared byte for byte and never parsed.

use crate::spec::{ConversionDomain, DomainId, ValueSpec};
use std::collections::HashMap;

/// Ordinal-aligned literals for one conversion domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTable {
    domain: DomainId,
    entries: Vec<String>,
    /// First ordinal holding each literal
    first_ordinal: HashMap<String, usize>,
}

impl ConversionTable {
    /// Builds the table for `domain` over `values`
    pub fn build(values: &[ValueSpec], domain: &ConversionDomain) -> Self {
        let entries: Vec<String> = values
            .iter()
            .map(|value| {
                value
                    .conversion_value(domain.id)
                    .unwrap_or(domain.default.as_str())
                    .to_string()
            })
            .collect();

        let mut first_ordinal = HashMap::with_capacity(entries.len());
        for (ordinal, literal) in entries.iter().enumerate() {
            first_ordinal.entry(literal.clone()).or_insert(ordinal);
        }

        Self {
            domain: domain.id,
            entries,
            first_ordinal,
        }
    }

    /// Domain this table belongs to
    pub fn domain(&self) -> DomainId {
        self.domain
    }

    /// Literals in ordinal order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries (always the number of real values)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the enumeration has no values
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordinal to external literal. `None` for the sentinel and beyond.
    pub fn to_external(&self, ordinal: usize) -> Option<&str> {
        self.entries.get(ordinal).map(String::as_str)
    }

    /// External literal to ordinal.
    ///
    /// When several values share a literal the lowest ordinal wins. A literal
    /// that no value holds maps to the sentinel ordinal. A domain default that
    /// some value also uses resolves to that value, not to the sentinel.
    pub fn from_external(&self, literal: &str) -> usize {
        self.first_ordinal
            .get(literal)
            .copied()
            .unwrap_or(self.entries.len())
    }
}
