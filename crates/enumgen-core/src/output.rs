//! Artifact pairs and where they get written.
//!
//! Both generators produce an [`Artifacts`] pair: an interface (`.h`) and an
//! implementation (`.cpp`). The [`ArtifactSink`] trait decides what happens
//! to a rendered pair. [`DirectorySink`] writes it to disk, [`MemorySink`]
//! keeps it for inspection.

use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Rendered interface and implementation text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Interface artifact (`.h`)
    pub header: String,
    /// Implementation artifact (`.cpp`)
    pub source: String,
}

/// File names of an artifact pair, without directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// Interface file name, e.g. `Color.yaml.h`
    pub header: String,
    /// Implementation file name, e.g. `Color.yaml.cpp`
    pub source: String,
}

impl ArtifactNames {
    /// Derives artifact names from the final segment of `input`.
    ///
    /// The full file name is kept and the extension appended, so
    /// `specs/Color.yaml` becomes `Color.yaml.h` / `Color.yaml.cpp`.
    pub fn for_input(
        input: &Path,
        header_extension: &str,
        source_extension: &str,
    ) -> Result<Self> {
        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid_input_path(input))?;

        Ok(Self {
            header: format!("{}.{}", file_name, header_extension),
            source: format!("{}.{}", file_name, source_extension),
        })
    }
}

/// Paths an artifact pair was written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Interface file path
    pub header: PathBuf,
    /// Implementation file path
    pub source: PathBuf,
}

/// Destination for rendered artifact pairs
pub trait ArtifactSink {
    /// Store one artifact pair under `names`
    fn write_artifacts(&mut self, names: &ArtifactNames, artifacts: &Artifacts)
        -> Result<ArtifactPaths>;
}

/// Writes artifact pairs into an output directory.
///
/// The directory, including missing parents, is created on first write.
/// Both files are fully written to temporary files inside the directory
/// before either is renamed into place, so an I/O failure while writing
/// leaves any previous pair untouched. The two renames are not atomic as a
/// pair.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn stage(&self, target: &Path, contents: &str) -> Result<NamedTempFile> {
        let mut builder = Builder::new();
        // Same mode a plain `File::create` gets, before the umask
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let mut file = builder
            .tempfile_in(&self.root)
            .map_err(|e| Error::file_write(target, e))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| Error::file_write(target, e))?;
        Ok(file)
    }
}

impl ArtifactSink for DirectorySink {
    fn write_artifacts(
        &mut self,
        names: &ArtifactNames,
        artifacts: &Artifacts,
    ) -> Result<ArtifactPaths> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| Error::directory_create(&self.root, e))?;

        let paths = ArtifactPaths {
            header: self.root.join(&names.header),
            source: self.root.join(&names.source),
        };

        let header = self.stage(&paths.header, &artifacts.header)?;
        let source = self.stage(&paths.source, &artifacts.source)?;

        header
            .persist(&paths.header)
            .map_err(|e| Error::file_write(&paths.header, e.error))?;
        source
            .persist(&paths.source)
            .map_err(|e| Error::file_write(&paths.source, e.error))?;

        debug!(
            "Wrote {} and {}",
            paths.header.display(),
            paths.source.display()
        );

        Ok(paths)
    }
}

/// Keeps artifact pairs in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Every pair written so far, in write order
    pub written: Vec<(ArtifactNames, Artifacts)>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactSink for MemorySink {
    fn write_artifacts(
        &mut self,
        names: &ArtifactNames,
        artifacts: &Artifacts,
    ) -> Result<ArtifactPaths> {
        self.written.push((names.clone(), artifacts.clone()));
        Ok(ArtifactPaths {
            header: PathBuf::from(&names.header),
            source: PathBuf::from(&names.source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pair() -> Artifacts {
        Artifacts {
            header: "// header\n".to_string(),
            source: "// source\n".to_string(),
        }
    }

    #[test]
    fn test_names_from_final_segment() {
        let names = ArtifactNames::for_input(Path::new("specs/gl/Color.yaml"), "h", "cpp").unwrap();
        assert_eq!(names.header, "Color.yaml.h");
        assert_eq!(names.source, "Color.yaml.cpp");
    }

    #[test]
    fn test_names_without_file_name() {
        let err = ArtifactNames::for_input(Path::new("/"), "h", "cpp").unwrap_err();
        assert!(matches!(err, Error::InvalidInputPath { .. }));
    }

    #[test]
    fn test_directory_sink_creates_nested_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gen").join("enums");
        let names = ArtifactNames::for_input(Path::new("Color.yaml"), "h", "cpp").unwrap();

        let paths = DirectorySink::new(&root)
            .write_artifacts(&names, &pair())
            .unwrap();

        assert_eq!(paths.header, root.join("Color.yaml.h"));
        assert_eq!(std::fs::read_to_string(&paths.header).unwrap(), "// header\n");
        assert_eq!(std::fs::read_to_string(&paths.source).unwrap(), "// source\n");
        // only the two artifacts remain, no staging leftovers
        assert_eq!(std::fs::read_dir(&root).unwrap().count(), 2);
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let names = ArtifactNames::for_input(Path::new("Color.yaml"), "h", "cpp").unwrap();
        let mut sink = DirectorySink::new(temp_dir.path());

        sink.write_artifacts(&names, &pair()).unwrap();
        let updated = Artifacts {
            header: "// new header\n".to_string(),
            source: "// new source\n".to_string(),
        };
        let paths = sink.write_artifacts(&names, &updated).unwrap();

        assert_eq!(std::fs::read_to_string(paths.source).unwrap(), "// new source\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_sink_artifact_mode_matches_plain_create() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("plain.txt");
        std::fs::write(&plain, "x").unwrap();
        let expected = std::fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

        let names = ArtifactNames::for_input(Path::new("Color.yaml"), "h", "cpp").unwrap();
        let paths = DirectorySink::new(temp_dir.path())
            .write_artifacts(&names, &pair())
            .unwrap();

        for path in [&paths.header, &paths.source] {
            let mode = std::fs::metadata(path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, expected, "{}", path.display());
        }
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        let names = ArtifactNames::for_input(Path::new("logo.png"), "h", "cpp").unwrap();
        sink.write_artifacts(&names, &pair()).unwrap();

        assert_eq!(sink.written.len(), 1);
        assert_eq!(sink.written[0].0.header, "logo.png.h");
    }
}
