//! C++ rendering of an enumeration.
//!
//! [`Emitter`] turns an [`EnumSpec`] and its [`EnumTables`] into an
//! [`Artifacts`] pair. The header holds the class, the packed name block and
//! every accessor that can be `constexpr`; the source holds the offset table,
//! the conversion data and the reverse lookups.
//!
//! For a spec named `Color` with a `GL` conversion the header looks like:
//!
//! ```text
//! class Color {
//! public:
//!     using TYPE = uint8_t;
//!     using CONV0_TYPE = GLenum;
//!     enum ENUM : TYPE { Red, Green, Blue, };
//!     static inline constexpr TYPE Count() { ... }
//!     static constexpr const char* ToName( const ENUM Value ) { ... }
//!     static ENUM FromName( const char* Name );
//!     static constexpr CONV0_TYPE ToGL( const ENUM Value ) { ... }
//!     static ENUM FromGL( const CONV0_TYPE CValue );
//! private:
//!     static constexpr TYPE _Count = 3;
//! };
//! ```

use crate::output::Artifacts;
use crate::spec::{ConversionDomain, EnumSpec};
use crate::tables::{ConversionTable, EnumTables, DEFAULT_SENTINEL_NAME};
use std::fmt::Write as FmtWrite;
use tracing::debug;

/// Banner placed on the first line of every generated file
pub const DEFAULT_BANNER: &str = "// GENERATED FILE: DO NOT EDIT MANUALLY";

/// Configuration for enumeration rendering
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Name of the sentinel ordinal (default: `INVALID`)
    pub sentinel_name: String,
    /// Indentation string (default: one tab)
    pub indent_str: String,
    /// Names per string literal line in the name block (default: 8)
    pub names_per_line: usize,
    /// Offsets per line in the offset table (default: 12)
    pub offsets_per_line: usize,
    /// Literals per line in conversion data (default: 8)
    pub conversions_per_line: usize,
    /// Interface file extension (default: `h`)
    pub header_extension: String,
    /// Implementation file extension (default: `cpp`)
    pub source_extension: String,
    /// First line of each artifact
    pub banner: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            sentinel_name: DEFAULT_SENTINEL_NAME.to_string(),
            indent_str: "\t".to_string(),
            names_per_line: 8,
            offsets_per_line: 12,
            conversions_per_line: 8,
            header_extension: "h".to_string(),
            source_extension: "cpp".to_string(),
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl EmitterConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sentinel name
    pub fn sentinel_name(mut self, name: impl Into<String>) -> Self {
        self.sentinel_name = name.into();
        self
    }

    /// Sets the indentation string
    pub fn indent_str(mut self, s: impl Into<String>) -> Self {
        self.indent_str = s.into();
        self
    }

    /// Sets how many names share one name block line
    pub fn names_per_line(mut self, n: usize) -> Self {
        self.names_per_line = n.max(1);
        self
    }

    /// Sets how many offsets share one line
    pub fn offsets_per_line(mut self, n: usize) -> Self {
        self.offsets_per_line = n.max(1);
        self
    }

    /// Sets how many conversion literals share one line
    pub fn conversions_per_line(mut self, n: usize) -> Self {
        self.conversions_per_line = n.max(1);
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

/// Renders enumeration specs into header/source pairs
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig,
}

impl Emitter {
    /// Creates an emitter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter with custom configuration
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Builds the tables for `spec` and renders both artifacts.
    ///
    /// `header_file_name` is what the source `#include`s.
    pub fn emit(&self, spec: &EnumSpec, header_file_name: &str) -> Artifacts {
        let tables = EnumTables::build(spec, &self.config.sentinel_name);
        self.emit_tables(spec, &tables, header_file_name)
    }

    /// Renders both artifacts from prebuilt tables
    pub fn emit_tables(
        &self,
        spec: &EnumSpec,
        tables: &EnumTables,
        header_file_name: &str,
    ) -> Artifacts {
        let mut header = String::new();
        let mut source = String::new();

        let mut writer = CppWriter::new(&mut header, &self.config, spec, tables);
        writer.write_header().expect("String write cannot fail");

        let mut writer = CppWriter::new(&mut source, &self.config, spec, tables);
        writer
            .write_source(header_file_name)
            .expect("String write cannot fail");

        debug!(
            "Rendered {} ({} values, {} conversions)",
            spec.name,
            tables.count(),
            tables.conversions().len()
        );

        Artifacts { header, source }
    }
}

struct CppWriter<'a, W: FmtWrite> {
    writer: &'a mut W,
    config: &'a EmitterConfig,
    spec: &'a EnumSpec,
    tables: &'a EnumTables,
    indent_level: usize,
}

impl<'a, W: FmtWrite> CppWriter<'a, W> {
    fn new(
        writer: &'a mut W,
        config: &'a EmitterConfig,
        spec: &'a EnumSpec,
        tables: &'a EnumTables,
    ) -> Self {
        Self {
            writer,
            config,
            spec,
            tables,
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) -> std::fmt::Result {
        for _ in 0..self.indent_level {
            write!(self.writer, "{}", self.config.indent_str)?;
        }
        Ok(())
    }

    fn writeln(&mut self, s: &str) -> std::fmt::Result {
        if s.is_empty() {
            return writeln!(self.writer);
        }
        self.write_indent()?;
        writeln!(self.writer, "{}", s)
    }

    /// Pairs every declared domain with its table
    fn domains(&self) -> impl Iterator<Item = (&'a ConversionDomain, &'a ConversionTable)> + 'a {
        let tables = self.tables;
        let spec = self.spec;
        spec.conversions
            .iter()
            .filter_map(move |domain| tables.conversion(domain.id).map(|t| (domain, t)))
    }

    fn write_namespace_open(&mut self) -> std::fmt::Result {
        if let Some(namespace) = &self.spec.namespace {
            writeln!(self.writer, "namespace {} {{", namespace)?;
        }
        Ok(())
    }

    fn write_namespace_close(&mut self) -> std::fmt::Result {
        if let Some(namespace) = &self.spec.namespace {
            writeln!(self.writer, "}} // namespace {}", namespace)?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> std::fmt::Result {
        let spec = self.spec;

        writeln!(self.writer, "{}", self.config.banner)?;
        writeln!(self.writer, "#pragma once")?;
        for include in &spec.includes {
            writeln!(self.writer, "{}", include.directive())?;
        }
        writeln!(self.writer)?;

        self.write_namespace_open()?;
        writeln!(self.writer, "class {} {{", spec.name)?;
        writeln!(self.writer, "public:")?;
        self.indent();

        self.writeln(&format!("using TYPE = {};", spec.backing_type))?;
        for (domain, _) in self.domains() {
            self.writeln(&format!("using CONV{}_TYPE = {};", domain.id, domain.type_name))?;
        }
        self.writeln("")?;

        self.write_enumerators()?;
        self.writeln("")?;

        self.writeln("static inline constexpr TYPE Count() { return _Count; }")?;
        self.writeln(
            "static inline constexpr bool IsValid( const TYPE Value ) { return Value >= 0 && Value < _Count; }",
        )?;
        self.writeln(
            "static inline constexpr ENUM Cast( const TYPE Value ) { return static_cast<ENUM>( IsValid( Value ) ? Value : _Count ); }",
        )?;
        self.writeln("")?;

        self.write_name_block()?;
        self.writeln("")?;

        self.writeln("//Converting to/from a human-readable name")?;
        self.writeln("static const TYPE _NameOffsets[];")?;
        self.writeln("static constexpr const char* ToName( const ENUM Value ) {")?;
        self.indent();
        self.writeln("return _NameBlock + _NameOffsets[static_cast<TYPE>( Value )];")?;
        self.dedent();
        self.writeln("}")?;
        self.writeln("static ENUM FromName( const char* Name );")?;

        for (domain, _) in self.domains() {
            self.write_conversion_declaration(domain)?;
        }
        self.writeln("")?;

        self.dedent();
        writeln!(self.writer, "private:")?;
        self.indent();
        self.writeln(&format!("static constexpr TYPE _Count = {};", self.tables.count()))?;
        self.dedent();
        writeln!(self.writer, "}};")?;
        self.write_namespace_close()?;

        Ok(())
    }

    fn write_enumerators(&mut self) -> std::fmt::Result {
        self.writeln("enum ENUM : TYPE {")?;
        self.indent();
        let spec = self.spec;
        for value in &spec.values {
            self.writeln(&format!("{},", value.name))?;
        }
        self.dedent();
        self.writeln("};")
    }

    fn write_name_block(&mut self) -> std::fmt::Result {
        self.writeln("static constexpr const char* _NameBlock =")?;
        self.indent();

        let tables = self.tables;
        let names: Vec<&str> = tables.names().names().collect();
        let chunks: Vec<&[&str]> = names.chunks(self.config.names_per_line.max(1)).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            let mut line = String::from("\"");
            for name in chunk.iter() {
                line.push_str(name);
                line.push_str("\\0");
            }
            line.push('"');
            if i + 1 == chunks.len() {
                line.push(';');
            }
            self.writeln(&line)?;
        }

        self.dedent();
        Ok(())
    }

    fn write_conversion_declaration(&mut self, domain: &ConversionDomain) -> std::fmt::Result {
        let id = domain.id;

        self.writeln("")?;
        self.writeln(&format!("//Conversion {}: to/from {}", id, domain.name))?;
        self.writeln(&format!("static const CONV{}_TYPE _Conv{}Data[];", id, id))?;
        self.writeln(&format!(
            "static constexpr CONV{}_TYPE To{}( const ENUM Value ) {{",
            id, domain.name
        ))?;
        self.indent();
        self.writeln(&format!("return _Conv{}Data[static_cast<TYPE>( Value )];", id))?;
        self.dedent();
        self.writeln("}")?;
        self.writeln(&format!(
            "static ENUM From{}( const CONV{}_TYPE CValue );",
            domain.name, id
        ))
    }

    fn write_source(&mut self, header_file_name: &str) -> std::fmt::Result {
        let spec = self.spec;
        let class = &spec.name;

        writeln!(self.writer, "{}", self.config.banner)?;
        writeln!(self.writer, "#include \"{}\"", header_file_name)?;
        writeln!(self.writer, "#include <cstring>")?;
        writeln!(self.writer)?;

        self.write_namespace_open()?;

        let offsets: Vec<String> = self
            .tables
            .names()
            .offsets()
            .iter()
            .map(|o| format!("{:>3}", o))
            .collect();
        writeln!(self.writer, "const {}::TYPE {}::_NameOffsets[] = {{", class, class)?;
        self.write_chunked(&offsets, self.config.offsets_per_line)?;
        writeln!(self.writer, "}};")?;
        writeln!(self.writer)?;

        writeln!(self.writer, "{}::ENUM {}::FromName( const char* Name ) {{", class, class)?;
        self.indent();
        self.write_scan("strcmp( _NameBlock + _NameOffsets[Index], Name ) == 0")?;
        self.dedent();
        writeln!(self.writer, "}}")?;

        for (domain, table) in self.domains() {
            self.write_conversion_definition(domain, table)?;
        }

        self.write_namespace_close()?;
        Ok(())
    }

    fn write_conversion_definition(
        &mut self,
        domain: &ConversionDomain,
        table: &ConversionTable,
    ) -> std::fmt::Result {
        let spec = self.spec;
        let class = &spec.name;
        let id = domain.id;

        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "const {}::CONV{}_TYPE {}::_Conv{}Data[] = {{",
            class, id, class, id
        )?;
        self.write_chunked(table.entries(), self.config.conversions_per_line)?;
        writeln!(self.writer, "}};")?;
        writeln!(self.writer)?;

        writeln!(
            self.writer,
            "{}::ENUM {}::From{}( const {}::CONV{}_TYPE CValue ) {{",
            class, class, domain.name, class, id
        )?;
        self.indent();
        self.write_scan(&format!("_Conv{}Data[Index] == CValue", id))?;
        self.dedent();
        writeln!(self.writer, "}}")
    }

    /// First-match linear scan over the real ordinals, sentinel on exhaustion
    fn write_scan(&mut self, condition: &str) -> std::fmt::Result {
        self.writeln("for( TYPE Index = 0; Index < _Count; ++Index ) {")?;
        self.indent();
        self.writeln(&format!("if( {} ) {{", condition))?;
        self.indent();
        self.writeln("return static_cast<ENUM>( Index );")?;
        self.dedent();
        self.writeln("}")?;
        self.dedent();
        self.writeln("}")?;
        self.writeln("return static_cast<ENUM>( _Count );")
    }

    fn write_chunked<S: AsRef<str>>(&mut self, items: &[S], per_line: usize) -> std::fmt::Result {
        self.indent();
        for chunk in items.chunks(per_line.max(1)) {
            let line = chunk
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            self.writeln(&format!("{},", line))?;
        }
        self.dedent();
        Ok(())
    }
}
