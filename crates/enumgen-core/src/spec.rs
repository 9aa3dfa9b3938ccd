//! Enumeration spec documents.
//!
//! An [`EnumSpec`] is the generator's only input. It is deserialized from a
//! YAML document of the shape:
//!
//! ```yaml
//! name: PixelFormat
//! type: uint8_t
//! namespace: Rendering
//! include: [<cstdint>, GL.h]
//! conv:
//!   - { name: GL, type: GLenum, default: GL_NONE }
//! values:
//!   - { name: RGB, conv: [GL_RGB] }
//!   - { name: RGBA, conv: [GL_RGBA] }
//!   - { name: Depth }
//! ```
//!
//! Every scalar is kept as opaque text. Numbers, booleans and hex literals are
//! never coerced, because they are pasted verbatim into generated source.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Stable identifier of a conversion domain.
///
/// Assigned from the declaration position when the spec is loaded. Every
/// generated accessor for the domain (`CONV{id}_TYPE`, `_Conv{id}Data`) is
/// keyed on this id, so header and source always agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainId(usize);

impl DomainId {
    /// Creates a domain id from a declaration index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the domain's entry in each value's `conv` list
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An include directive emitted at the top of the generated header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// `#include <path>`
    System(String),
    /// `#include "path"`
    Relative(String),
}

impl Include {
    /// Classifies a raw include entry. A leading `<` marks a system include.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('<') {
            Some(inner) => Include::System(inner.strip_suffix('>').unwrap_or(inner).to_string()),
            None => Include::Relative(raw.to_string()),
        }
    }

    /// Renders the preprocessor directive
    pub fn directive(&self) -> String {
        match self {
            Include::System(path) => format!("#include <{}>", path),
            Include::Relative(path) => format!("#include \"{}\"", path),
        }
    }
}

/// An auxiliary value space mapped to and from the enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionDomain {
    /// Stable identifier
    pub id: DomainId,
    /// Label used for the `To{name}` / `From{name}` accessors
    pub name: String,
    /// External value type name
    pub type_name: String,
    /// Literal used when a value has no entry for this domain
    pub default: String,
}

/// A single enumerator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    /// Identifier and display name
    pub name: String,
    /// Per-domain literals, aligned with [`EnumSpec::conversions`]
    pub conversion_values: Vec<Option<String>>,
}

impl ValueSpec {
    /// Creates a value with no conversion entries
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conversion_values: Vec::new(),
        }
    }

    /// Sets the per-domain conversion literals
    pub fn with_conversions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.conversion_values = values.into_iter().map(|v| v.map(Into::into)).collect();
        self
    }

    /// Returns the literal supplied for `domain`.
    ///
    /// An out-of-range position and an explicit null both read as `None`.
    pub fn conversion_value(&self, domain: DomainId) -> Option<&str> {
        self.conversion_values
            .get(domain.index())
            .and_then(|v| v.as_deref())
    }
}

/// Declarative description of one generated enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    /// Name of the generated type
    pub name: String,
    /// Ordinal storage type name
    pub backing_type: String,
    /// Values in ordinal order
    pub values: Vec<ValueSpec>,
    /// Include directives, in declaration order
    pub includes: Vec<Include>,
    /// Optional enclosing namespace
    pub namespace: Option<String>,
    /// Conversion domains, in declaration order
    pub conversions: Vec<ConversionDomain>,
}

impl EnumSpec {
    /// Creates a spec with no includes, namespace or conversions
    pub fn new(
        name: impl Into<String>,
        backing_type: impl Into<String>,
        values: Vec<ValueSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            backing_type: backing_type.into(),
            values,
            includes: Vec::new(),
            namespace: None,
            conversions: Vec::new(),
        }
    }

    /// Appends a conversion domain, assigning it the next id
    pub fn with_conversion(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let id = DomainId::new(self.conversions.len());
        self.conversions.push(ConversionDomain {
            id,
            name: name.into(),
            type_name: type_name.into(),
            default: default.into(),
        });
        self
    }

    /// Sets the enclosing namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Appends an include directive, classified with [`Include::parse`]
    pub fn with_include(mut self, raw: &str) -> Self {
        self.includes.push(Include::parse(raw));
        self
    }

    /// Parses a spec from YAML text
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let raw: RawSpec = serde_yaml::from_str(text)?;
        Ok(raw.into())
    }

    /// Reads and parses a spec file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        let spec = Self::from_yaml_str(&text).map_err(|e| Error::spec_parse(path, e))?;

        debug!(
            "Loaded enumeration {} ({} values, {} conversions) from {}",
            spec.name,
            spec.values.len(),
            spec.conversions.len(),
            path.display()
        );

        Ok(spec)
    }

    /// Value names in ordinal order
    pub fn value_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(|v| v.name.as_str())
    }
}

// Document shape as written by spec authors.

#[derive(Debug, Deserialize)]
struct RawSpec {
    name: String,
    #[serde(rename = "type")]
    backing_type: String,
    values: Vec<RawValue>,
    #[serde(default)]
    include: Option<Vec<String>>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    conv: Option<Vec<RawDomain>>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    name: String,
    #[serde(default)]
    conv: Option<Vec<Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct RawDomain {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    default: String,
}

impl From<RawSpec> for EnumSpec {
    fn from(raw: RawSpec) -> Self {
        let values = raw
            .values
            .into_iter()
            .map(|v| ValueSpec {
                name: v.name,
                conversion_values: v.conv.unwrap_or_default(),
            })
            .collect();

        let conversions = raw
            .conv
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, d)| ConversionDomain {
                id: DomainId::new(i),
                name: d.name,
                type_name: d.type_name,
                default: d.default,
            })
            .collect();

        Self {
            name: raw.name,
            backing_type: raw.backing_type,
            values,
            includes: raw
                .include
                .unwrap_or_default()
                .iter()
                .map(|s| Include::parse(s))
                .collect(),
            namespace: raw.namespace,
            conversions,
        }
    }
}
