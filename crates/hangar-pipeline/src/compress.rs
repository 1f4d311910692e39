//! Batch compression of ship models.
//!
//! Every catalog ship is looked up in the sources directory and written to
//! `<assets>/models/<model file>`, the path the viewer loads from its own
//! asset directory. The Imperial source is
//! already optimized and is copied as-is; every other source is run through
//! an external glTF compressor with Draco enabled. A failing ship is logged
//! and recorded as skipped, and the run continues.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use hangar::{ShipId, catalog};

use crate::report::{Action, FileResult, Report, SkippedFile};
use crate::{Error, Result};

/// Default command used to invoke the compressor.
pub const DEFAULT_TOOL: &[&str] = &["npx", "gltf-pipeline"];

/// Source file name for ships whose model is already optimized.
const PREOPTIMIZED_SOURCE: &str = "ship_optimized.glb";

/// Settings for a compression run.
#[derive(Debug, Clone)]
pub struct CompressConfig {
    /// Directory holding the source `.glb` files.
    pub sources_dir: PathBuf,
    /// Directory the optimized files are written to.
    pub output_dir: PathBuf,
    /// Program and leading arguments of the compressor.
    pub tool: Vec<String>,
}

impl CompressConfig {
    /// Settings reading from `sources_dir` and writing into the model
    /// directory of the viewer assets at `assets_dir`.
    #[must_use]
    pub fn new(sources_dir: impl Into<PathBuf>, assets_dir: impl AsRef<Path>) -> Self {
        Self {
            sources_dir: sources_dir.into(),
            output_dir: assets_dir.as_ref().join(catalog::MODEL_ASSET_DIR),
            tool: DEFAULT_TOOL.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Where a ship's model comes from and how it is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelJob {
    pub ship: ShipId,
    pub source: PathBuf,
    pub output: PathBuf,
    pub action: Action,
}

impl ModelJob {
    #[must_use]
    pub fn for_ship(ship: ShipId, config: &CompressConfig) -> Self {
        let (file_name, action) = match ship {
            ShipId::Imperial => (PREOPTIMIZED_SOURCE.to_string(), Action::Copied),
            other => (format!("{}.glb", other.as_str()), Action::Compressed),
        };
        Self {
            ship,
            source: config.sources_dir.join(file_name),
            output: config.output_dir.join(ship.config().model_file),
            action,
        }
    }

    fn run(&self, tool: &[String]) -> Result<FileResult> {
        if !self.source.is_file() {
            return Err(Error::MissingSource {
                path: self.source.clone(),
            });
        }
        let original_bytes = file_size(&self.source)?;

        match self.action {
            // Sources already in place are left alone.
            Action::Copied if self.source == self.output => {}
            Action::Copied => {
                fs::copy(&self.source, &self.output)
                    .map_err(|e| Error::io("copy", &self.source, e))?;
            }
            Action::Compressed => compress(tool, &self.source, &self.output)?,
        }

        Ok(FileResult {
            ship: self.ship,
            action: self.action,
            original_bytes,
            optimized_bytes: file_size(&self.output)?,
        })
    }
}

/// Process every catalog ship in order.
///
/// Only failing to create the output directory aborts the run.
pub fn compress_all(config: &CompressConfig) -> Result<Report> {
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| Error::io("create directory", &config.output_dir, e))?;

    let mut report = Report::default();
    let total = ShipId::ALL.len();

    for (index, ship) in ShipId::ALL.into_iter().enumerate() {
        let job = ModelJob::for_ship(ship, config);
        tracing::info!("[{}/{total}] processing {ship}", index + 1);

        match job.run(&config.tool) {
            Ok(result) => {
                tracing::info!(
                    "{ship}: {:?}, {:.2} MB -> {:.2} MB ({:.1}% smaller)",
                    result.action,
                    crate::report::megabytes(result.original_bytes),
                    crate::report::megabytes(result.optimized_bytes),
                    result.reduction_percent(),
                );
                report.files.push(result);
            }
            Err(Error::MissingSource { path }) => {
                tracing::warn!("{ship}: skipped, {} does not exist", path.display());
                report.skipped.push(SkippedFile {
                    ship,
                    reason: format!("missing source {}", path.display()),
                });
            }
            Err(e) => {
                tracing::error!("{ship}: {e}");
                report.skipped.push(SkippedFile {
                    ship,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn compress(tool: &[String], source: &Path, output: &Path) -> Result<()> {
    let Some((program, leading)) = tool.split_first() else {
        return Err(Error::Spawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty tool command"),
        });
    };

    let result = Command::new(program)
        .args(leading)
        .arg("-i")
        .arg(source)
        .arg("-o")
        .arg(output)
        .arg("-d")
        .output()
        .map_err(|source| Error::Spawn {
            program: program.clone(),
            source,
        })?;

    if !result.status.success() {
        return Err(Error::Tool {
            program: program.clone(),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    Ok(())
}

fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::io("read metadata of", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hangar-pipeline-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_job_paths() {
        let config = CompressConfig::new("raw", "site");
        assert_eq!(config.output_dir, Path::new("site/models"));

        let imperial = ModelJob::for_ship(ShipId::Imperial, &config);
        assert_eq!(imperial.source, Path::new("raw/ship_optimized.glb"));
        assert_eq!(imperial.output, Path::new("site/models/ship_optimized.glb"));
        assert_eq!(imperial.action, Action::Copied);

        let naga = ModelJob::for_ship(ShipId::Naga, &config);
        assert_eq!(naga.source, Path::new("raw/naga.glb"));
        assert_eq!(naga.output, Path::new("site/models/naga_optimized.glb"));
        assert_eq!(naga.action, Action::Compressed);
    }

    #[test]
    fn test_output_is_viewer_asset_path() {
        let config = CompressConfig::new("models", "assets");
        for ship in ShipId::ALL {
            let job = ModelJob::for_ship(ship, &config);
            assert_eq!(
                job.output,
                Path::new("assets").join(ship.config().model_asset_path()),
                "{ship}"
            );
        }
    }

    #[test]
    fn test_copy_onto_itself_keeps_file() {
        let dir = scratch_dir("in-place");
        let config = CompressConfig::new(dir.join("models"), &dir);
        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_dir.join(PREOPTIMIZED_SOURCE), vec![7u8; 512]).unwrap();

        let job = ModelJob::for_ship(ShipId::Imperial, &config);
        assert_eq!(job.source, job.output);
        let result = job.run(&config.tool).unwrap();
        assert_eq!(result.optimized_bytes, 512);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_run_copies_and_skips() {
        let dir = scratch_dir("run");
        fs::write(dir.join(PREOPTIMIZED_SOURCE), vec![0u8; 2048]).unwrap();
        fs::write(dir.join("naga.glb"), vec![0u8; 4096]).unwrap();

        let mut config = CompressConfig::new(&dir, dir.join("assets"));
        config.tool = vec!["hangar-pipeline-tool-that-does-not-exist".into()];

        let report = compress_all(&config).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].ship, ShipId::Imperial);
        assert_eq!(report.files[0].original_bytes, 2048);
        assert_eq!(report.files[0].optimized_bytes, 2048);
        assert!(dir.join("assets/models/ship_optimized.glb").is_file());

        // Naga failed to compress, the other seven have no source.
        assert_eq!(report.skipped.len(), ShipId::ALL.len() - 1);
        let naga = report
            .skipped
            .iter()
            .find(|s| s.ship == ShipId::Naga)
            .unwrap();
        assert!(naga.reason.contains("failed to start"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_tool_is_an_error() {
        let err = compress(&[], Path::new("a.glb"), Path::new("b.glb")).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
