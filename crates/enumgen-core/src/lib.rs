//! # enumgen-core
//!
//! A library for generating reflection-free C++ enumerations and embedded
//! byte arrays at build time.
//!
//! This crate provides the core functionality for:
//! - Loading declarative enumeration specs from YAML
//! - Packing value names into a single NUL-separated block with an offset table
//! - Building per-domain conversion tables to and from external values
//! - Rendering a `.h` / `.cpp` pair for the enumeration
//! - Rendering a `.h` / `.cpp` pair that embeds a file's raw bytes
//!
//! ## Architecture
//!
//! - [`spec`]: Spec documents and their loader
//! - [`tables`]: Name block and conversion tables
//! - [`emit`]: C++ rendering of an enumeration
//! - [`embed`]: C++ rendering of a byte array
//! - [`output`]: Artifact pairs and sinks
//! - [`generate`]: File-to-file entry points
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use enumgen_core::{generate_enum, EmitterConfig};
//!
//! let paths = generate_enum("specs/Color.yaml", "generated", &EmitterConfig::default())?;
//! println!("{}", paths.header.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`ArtifactSink`]: Customize where rendered artifacts go

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod embed;
pub mod emit;
pub mod error;
pub mod generate;
pub mod output;
pub mod spec;
pub mod tables;

// Re-export primary types for convenience
pub use embed::{constant_name, EmbedConfig, Embedder};
pub use emit::{Emitter, EmitterConfig};
pub use error::{Error, Result};
pub use generate::{generate_embed, generate_embed_into, generate_enum, generate_enum_into};
pub use output::{ArtifactNames, ArtifactPaths, ArtifactSink, Artifacts, DirectorySink, MemorySink};
pub use spec::{ConversionDomain, DomainId, EnumSpec, Include, ValueSpec};
pub use tables::{ConversionTable, EnumTables, NameBlock, DEFAULT_SENTINEL_NAME};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
