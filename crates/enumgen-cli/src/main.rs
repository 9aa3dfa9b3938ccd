//! enumgen - Generate reflection-free C++ enumerations at build time
//!
//! This tool turns YAML enumeration specs into `.h` / `.cpp` pairs with
//! name and conversion lookups baked in, and embeds arbitrary files as
//! constant byte arrays.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use enumgen_core::{generate_embed, generate_enum, ArtifactNames, EmbedConfig, EmitterConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Generate reflection-free C++ enumerations and embedded byte arrays
#[derive(Parser, Debug)]
#[command(name = "enumgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate enumerations from YAML specs
    Enum(EnumArgs),
    /// Embed files as constant byte arrays
    Embed(EmbedArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output directory for generated artifacts (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Extension of the interface artifact
    #[arg(long, default_value = "h")]
    header_ext: String,

    /// Extension of the implementation artifact
    #[arg(long, default_value = "cpp")]
    source_ext: String,
}

#[derive(Args, Debug)]
struct EnumArgs {
    /// Spec files, or directories searched recursively for *.yaml / *.yml
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    /// Name of the sentinel ordinal
    #[arg(long, default_value = "INVALID")]
    sentinel_name: String,
}

#[derive(Args, Debug)]
struct EmbedArgs {
    /// Files to embed
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,

    /// Namespace wrapping the embedded constants
    #[arg(long, default_value = "Embedded")]
    namespace: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    match &cli.command {
        Command::Enum(args) => run_enum(args),
        Command::Embed(args) => run_embed(args),
    }
}

fn run_enum(args: &EnumArgs) -> Result<()> {
    let config = EmitterConfig::new()
        .sentinel_name(&args.sentinel_name)
        .header_extension(&args.output.header_ext)
        .source_extension(&args.output.source_ext);

    let specs = collect_specs(&args.inputs)?;
    if specs.is_empty() {
        bail!("No enumeration specs found in the given inputs");
    }
    check_distinct_outputs(&specs, &args.output)?;

    for spec in &specs {
        debug!("Processing spec: {}", spec.display());
        generate_enum(spec, &args.output.output, &config)
            .with_context(|| format!("Failed to generate enumeration from {}", spec.display()))?;
    }

    info!(
        "Generated {} enumeration(s) into {}",
        specs.len(),
        args.output.output.display()
    );
    Ok(())
}

fn run_embed(args: &EmbedArgs) -> Result<()> {
    let config = EmbedConfig::new()
        .namespace(&args.namespace)
        .header_extension(&args.output.header_ext)
        .source_extension(&args.output.source_ext);

    for input in &args.inputs {
        if !input.is_file() {
            bail!("Input path is not a file: {}", input.display());
        }
    }
    check_distinct_outputs(&args.inputs, &args.output)?;

    for input in &args.inputs {
        generate_embed(input, &args.output.output, &config)
            .with_context(|| format!("Failed to embed {}", input.display()))?;
    }

    info!(
        "Embedded {} file(s) into {}",
        args.inputs.len(),
        args.output.output.display()
    );
    Ok(())
}

/// Expands directories into the spec files they contain, keeping order
fn collect_specs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut specs = Vec::new();

    for input in inputs {
        if input.is_file() {
            specs.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("Input does not exist: {}", input.display());
        }

        let mut found: Vec<PathBuf> = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && is_spec_file(p))
            .collect();
        found.sort();
        trace!("Found {} spec(s) under {}", found.len(), input.display());
        specs.extend(found);
    }

    Ok(specs)
}

/// Fails if two inputs would write the same artifact pair
fn check_distinct_outputs(inputs: &[PathBuf], output: &OutputArgs) -> Result<()> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(inputs.len());

    for input in inputs {
        let names = ArtifactNames::for_input(input, &output.header_ext, &output.source_ext)?;
        if let Some(previous) = seen.insert(names.header.clone(), input) {
            bail!(
                "{} and {} would both generate {}",
                previous.display(),
                input.display(),
                output.output.join(&names.header).display()
            );
        }
    }

    Ok(())
}

/// Spec files are YAML documents that are not hidden
fn is_spec_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false);

    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    yaml && !hidden
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_spec_file() {
        assert!(is_spec_file(Path::new("specs/Color.yaml")));
        assert!(is_spec_file(Path::new("specs/Color.YML")));
        assert!(!is_spec_file(Path::new("specs/.Color.yaml")));
        assert!(!is_spec_file(Path::new("specs/Color.json")));
        assert!(!is_spec_file(Path::new("specs/Color")));
    }

    #[test]
    fn test_collect_specs_walks_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("rendering");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp_dir.path().join("b.yaml"), "").unwrap();
        std::fs::write(nested.join("a.yml"), "").unwrap();
        std::fs::write(nested.join("notes.txt"), "").unwrap();
        let single = temp_dir.path().join("b.yaml");

        let specs = collect_specs(&[single.clone(), temp_dir.path().to_path_buf()]).unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0], single);
        assert!(specs.iter().all(|p| is_spec_file(p)));
    }

    #[test]
    fn test_collect_specs_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_specs(&[temp_dir.path().join("missing")]).is_err());
    }

    #[test]
    fn test_run_enum_writes_pair() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("Color.yaml");
        std::fs::write(&input, "name: Color\ntype: uint8_t\nvalues:\n  - name: Red\n").unwrap();
        let out = temp_dir.path().join("out");

        let cli = Cli::parse_from([
            "enumgen",
            "enum",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--sentinel-name",
            "NONE",
        ]);
        let Command::Enum(args) = &cli.command else {
            panic!("expected enum subcommand");
        };
        run_enum(args).unwrap();

        let header = std::fs::read_to_string(out.join("Color.yaml.h")).unwrap();
        assert!(header.contains("\"Red\\0NONE\\0\";"));
        assert!(out.join("Color.yaml.cpp").exists());
    }

    #[test]
    fn test_run_embed_custom_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("icon.bin");
        std::fs::write(&input, [1u8, 2, 3]).unwrap();
        let out = temp_dir.path().join("out");

        let cli = Cli::parse_from([
            "enumgen",
            "embed",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--header-ext",
            "hpp",
            "--namespace",
            "Assets",
        ]);
        let Command::Embed(args) = &cli.command else {
            panic!("expected embed subcommand");
        };
        run_embed(args).unwrap();

        let header = std::fs::read_to_string(out.join("icon.bin.hpp")).unwrap();
        assert!(header.contains("namespace Assets {"));
        assert!(out.join("icon.bin.cpp").exists());
    }

    #[test]
    fn test_run_enum_rejects_same_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let specs = temp_dir.path().join("specs");
        for dir in ["a", "b"] {
            let dir = specs.join(dir);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(
                dir.join("Color.yaml"),
                "name: Color\ntype: uint8_t\nvalues:\n  - name: Red\n",
            )
            .unwrap();
        }
        let out = temp_dir.path().join("out");

        let cli = Cli::parse_from([
            "enumgen",
            "enum",
            specs.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        let Command::Enum(args) = &cli.command else {
            panic!("expected enum subcommand");
        };
        let err = run_enum(args).unwrap_err();

        assert!(err.to_string().contains("Color.yaml.h"));
        assert!(!out.exists());
    }

    #[test]
    fn test_run_embed_rejects_same_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a").join("logo.png");
        let second = temp_dir.path().join("b").join("logo.png");
        for path in [&first, &second] {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, [0u8, 1]).unwrap();
        }
        let out = temp_dir.path().join("out");

        let cli = Cli::parse_from([
            "enumgen",
            "embed",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        let Command::Embed(args) = &cli.command else {
            panic!("expected embed subcommand");
        };

        assert!(run_embed(args).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
