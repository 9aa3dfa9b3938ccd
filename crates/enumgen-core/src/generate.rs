//! End-to-end generator entry points.
//!
//! Each entry point reads its input completely and renders both artifacts
//! in memory before handing them to a sink, so an unreadable input or a bad
//! spec never touches the output directory.

use crate::embed::{constant_name, EmbedConfig, Embedder};
use crate::emit::{Emitter, EmitterConfig};
use crate::error::{Error, Result};
use crate::output::{ArtifactNames, ArtifactPaths, ArtifactSink, DirectorySink};
use crate::spec::EnumSpec;
use std::path::Path;
use tracing::info;

/// Generates the enumeration described by the spec at `input` into
/// `output_dir`, creating the directory if needed.
pub fn generate_enum(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &EmitterConfig,
) -> Result<ArtifactPaths> {
    let mut sink = DirectorySink::new(output_dir.as_ref());
    generate_enum_into(input, &mut sink, config)
}

/// Like [`generate_enum`], writing to any [`ArtifactSink`]
pub fn generate_enum_into(
    input: impl AsRef<Path>,
    sink: &mut dyn ArtifactSink,
    config: &EmitterConfig,
) -> Result<ArtifactPaths> {
    let input = input.as_ref();
    let names = ArtifactNames::for_input(input, &config.header_extension, &config.source_extension)?;
    let spec = EnumSpec::from_file(input)?;

    let artifacts = Emitter::with_config(config.clone()).emit(&spec, &names.header);
    let paths = sink.write_artifacts(&names, &artifacts)?;

    info!("Generated enumeration {} from {}", spec.name, input.display());
    Ok(paths)
}

/// Embeds the bytes of `input` as a constant array in `output_dir`,
/// creating the directory if needed.
pub fn generate_embed(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &EmbedConfig,
) -> Result<ArtifactPaths> {
    let mut sink = DirectorySink::new(output_dir.as_ref());
    generate_embed_into(input, &mut sink, config)
}

/// Like [`generate_embed`], writing to any [`ArtifactSink`]
pub fn generate_embed_into(
    input: impl AsRef<Path>,
    sink: &mut dyn ArtifactSink,
    config: &EmbedConfig,
) -> Result<ArtifactPaths> {
    let input = input.as_ref();
    let names = ArtifactNames::for_input(input, &config.header_extension, &config.source_extension)?;
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::invalid_input_path(input))?;
    let name = constant_name(file_name);

    let bytes = std::fs::read(input).map_err(|e| Error::file_read(input, e))?;

    let artifacts = Embedder::with_config(config.clone()).embed(&name, &bytes, &names.header);
    let paths = sink.write_artifacts(&names, &artifacts)?;

    info!("Embedded {} ({} bytes) as {}", input.display(), bytes.len(), name);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use tempfile::TempDir;

    #[test]
    fn test_enum_into_memory() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Color.yaml");
        std::fs::write(
            &input,
            "name: Color\ntype: uint8_t\nvalues:\n  - name: Red\n  - name: Green\n",
        )
        .unwrap();

        let mut sink = MemorySink::new();
        generate_enum_into(&input, &mut sink, &EmitterConfig::default()).unwrap();

        let (names, artifacts) = &sink.written[0];
        assert_eq!(names.header, "Color.yaml.h");
        assert!(artifacts.source.contains("#include \"Color.yaml.h\""));
        assert!(artifacts.header.contains("\"Red\\0Green\\0INVALID\\0\";"));
    }

    #[test]
    fn test_bad_spec_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Broken.yaml");
        std::fs::write(&input, "name: Broken\nvalues: []\n").unwrap();
        let out = temp_dir.path().join("out");

        let err = generate_enum(&input, &out, &EmitterConfig::default()).unwrap_err();

        assert!(matches!(err, Error::SpecParse { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");

        let err = generate_embed(temp_dir.path().join("nope.bin"), &out, &EmbedConfig::default())
            .unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }));
        assert!(err.is_input_error());
        assert!(!out.exists());
    }

    #[test]
    fn test_embed_into_memory() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("logo.png");
        std::fs::write(&input, [0x89, b'P', b'N', b'G']).unwrap();

        let mut sink = MemorySink::new();
        generate_embed_into(&input, &mut sink, &EmbedConfig::default()).unwrap();

        let (names, artifacts) = &sink.written[0];
        assert_eq!(names.source, "logo.png.cpp");
        assert!(artifacts.header.contains("std::array<uint8_t, 4> const logo_png;"));
        assert!(artifacts.source.contains("0x89,0x50,0x4E,0x47,"));
    }
}
