//! Embedding arbitrary files as byte arrays.
//!
//! The generated header declares `extern std::array<uint8_t, N> const NAME;`
//! and the source defines it, one `0xHH,` per byte.

use crate::emit::DEFAULT_BANNER;
use crate::output::Artifacts;
use std::fmt::Write as FmtWrite;
use tracing::debug;

/// Configuration for byte embedding
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Namespace wrapping the constant (default: `Embedded`)
    pub namespace: String,
    /// Bytes per line in the definition (default: 16)
    pub bytes_per_line: usize,
    /// Indentation string (default: one tab)
    pub indent_str: String,
    /// Interface file extension (default: `h`)
    pub header_extension: String,
    /// Implementation file extension (default: `cpp`)
    pub source_extension: String,
    /// First line of each artifact
    pub banner: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            namespace: "Embedded".to_string(),
            bytes_per_line: 16,
            indent_str: "\t".to_string(),
            header_extension: "h".to_string(),
            source_extension: "cpp".to_string(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl EmbedConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wrapping namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets how many bytes share one line
    pub fn bytes_per_line(mut self, n: usize) -> Self {
        self.bytes_per_line = n.max(1);
        self
    }

    /// Sets the indentation string
    pub fn indent_str(mut self, s: impl Into<String>) -> Self {
        self.indent_str = s.into();
        self
    }

    /// Sets the interface file extension
    pub fn header_extension(mut self, ext: impl Into<String>) -> Self {
        self.header_extension = ext.into();
        self
    }

    /// Sets the implementation file extension
    pub fn source_extension(mut self, ext: impl Into<String>) -> Self {
        self.source_extension = ext.into();
        self
    }

    /// Sets the banner line
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }
}

/// Derives a C++ identifier from a file name.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit
/// gets a `_` prefix: `logo.png` → `logo_png`, `8x8-font.bin` → `_8x8_font_bin`.
pub fn constant_name(file_name: &str) -> String {
    let mut name: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Renders byte arrays into header/source pairs
#[derive(Debug, Clone, Default)]
pub struct Embedder {
    config: EmbedConfig,
}

impl Embedder {
    /// Creates an embedder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an embedder with custom configuration
    pub fn with_config(config: EmbedConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Renders `bytes` as the constant `name`
    pub fn embed(&self, name: &str, bytes: &[u8], header_file_name: &str) -> Artifacts {
        let mut header = String::new();
        let mut source = String::new();

        self.write_header(&mut header, name, bytes.len())
            .expect("String write cannot fail");
        self.write_source(&mut source, name, bytes, header_file_name)
            .expect("String write cannot fail");

        debug!("Embedded {} bytes as {}", bytes.len(), name);
        Artifacts { header, source }
    }

    fn write_header(&self, w: &mut impl FmtWrite, name: &str, size: usize) -> std::fmt::Result {
        let indent = &self.config.indent_str;

        writeln!(w, "{}", self.config.banner)?;
        writeln!(w, "#pragma once")?;
        writeln!(w, "#include <array>")?;
        writeln!(w, "#include <cstdint>")?;
        writeln!(w)?;
        writeln!(w, "namespace {} {{", self.config.namespace)?;
        writeln!(w, "{}extern std::array<uint8_t, {}> const {};", indent, size, name)?;
        writeln!(w, "}}")
    }

    fn write_source(
        &self,
        w: &mut impl FmtWrite,
        name: &str,
        bytes: &[u8],
        header_file_name: &str,
    ) -> std::fmt::Result {
        let indent = &self.config.indent_str;

        writeln!(w, "{}", self.config.banner)?;
        writeln!(w, "#include \"{}\"", header_file_name)?;
        writeln!(w)?;
        writeln!(w, "namespace {} {{", self.config.namespace)?;
        writeln!(
            w,
            "{}std::array<uint8_t, {}> const {} = {{",
            indent,
            bytes.len(),
            name
        )?;
        for chunk in bytes.chunks(self.config.bytes_per_line.max(1)) {
            write!(w, "{}{}", indent, indent)?;
            for byte in chunk {
                write!(w, "0x{:02X},", byte)?;
            }
            writeln!(w)?;
        }
        writeln!(w, "{}}};", indent)?;
        writeln!(w, "}}")
    }
}
