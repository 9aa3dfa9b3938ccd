//! Lookup tables backing a generated enumeration.
//!
//! [`EnumTables`] bundles the packed [`NameBlock`] with one
//! [`ConversionTable`] per domain. The emitter renders these tables into C++
//! literals; the query methods here answer every question the generated
//! class answers (`Count`, `IsValid`, `Cast`, `ToName`, `FromName`,
//! `To{Domain}`, `From{Domain}`) with the same results.

mod conversion;
mod names;

use crate::spec::{DomainId, EnumSpec};
use tracing::trace;

pub use conversion::ConversionTable;
pub use names::{NameBlock, DEFAULT_SENTINEL_NAME};

/// Name block and conversion tables for one enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTables {
    names: NameBlock,
    conversions: Vec<ConversionTable>,
}

impl EnumTables {
    /// Packs names and builds every conversion table for `spec`
    pub fn build(spec: &EnumSpec, sentinel_name: &str) -> Self {
        let names = NameBlock::pack(spec.value_names(), sentinel_name);
        trace!(
            "Packed {} names into {} bytes",
            names.count(),
            names.blob().len()
        );

        let conversions = spec
            .conversions
            .iter()
            .map(|domain| ConversionTable::build(&spec.values, domain))
            .collect();

        Self { names, conversions }
    }

    /// The packed name block
    pub fn names(&self) -> &NameBlock {
        &self.names
    }

    /// Conversion tables in domain order
    pub fn conversions(&self) -> &[ConversionTable] {
        &self.conversions
    }

    /// Table for `domain`, if the spec declares it
    pub fn conversion(&self, domain: DomainId) -> Option<&ConversionTable> {
        self.conversions.iter().find(|t| t.domain() == domain)
    }

    /// Number of real values
    pub fn count(&self) -> usize {
        self.names.count()
    }

    /// The sentinel ordinal, one past the last real value
    pub fn sentinel(&self) -> usize {
        self.names.count()
    }

    /// True iff `0 <= ordinal < count`
    pub fn is_valid(&self, ordinal: i64) -> bool {
        usize::try_from(ordinal).map_or(false, |o| o < self.count())
    }

    /// Maps a valid ordinal to itself and anything else to the sentinel
    pub fn cast(&self, ordinal: i64) -> usize {
        match usize::try_from(ordinal) {
            Ok(o) if o < self.count() => o,
            _ => self.sentinel(),
        }
    }

    /// Display name of `ordinal`; the sentinel has one too
    pub fn to_name(&self, ordinal: usize) -> Option<&str> {
        self.names.name(ordinal)
    }

    /// Ordinal of `name`, or the sentinel
    pub fn from_name(&self, name: &str) -> usize {
        self.names.lookup(name)
    }
}
