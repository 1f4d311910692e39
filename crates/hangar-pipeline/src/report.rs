//! Compression results and deployment advice.

use std::fmt;

use hangar::ShipId;
use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Below this total the models can live alongside the code.
pub const SAME_REPOSITORY_LIMIT_BYTES: u64 = 20 * 1024 * 1024;
/// Above this total the models cannot live alongside the code.
pub const OBJECT_STORAGE_REQUIRED_BYTES: u64 = 100 * 1024 * 1024;

/// How a model was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The source was already optimized and was copied.
    Copied,
    /// The source was run through the compression tool.
    Compressed,
}

/// Outcome for one successfully processed model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    pub ship: ShipId,
    pub action: Action,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
}

impl FileResult {
    /// Size reduction in percent (negative if the output grew).
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.original_bytes, self.optimized_bytes)
    }
}

/// A model that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub ship: ShipId,
    pub reason: String,
}

/// Where the optimized models should be deployed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentAdvice {
    /// Small enough to ship with the site itself.
    SameRepository,
    /// Fits, but an object store is the better home.
    ObjectStorageRecommended,
    /// Too large for the repository; must go to an object store.
    ObjectStorageRequired,
}

impl DeploymentAdvice {
    /// Advice for a total optimized size.
    #[must_use]
    pub fn for_total(bytes: u64) -> Self {
        if bytes < SAME_REPOSITORY_LIMIT_BYTES {
            DeploymentAdvice::SameRepository
        } else if bytes < OBJECT_STORAGE_REQUIRED_BYTES {
            DeploymentAdvice::ObjectStorageRecommended
        } else {
            DeploymentAdvice::ObjectStorageRequired
        }
    }
}

impl fmt::Display for DeploymentAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeploymentAdvice::SameRepository => {
                "total < 20 MB: models can be committed and deployed with the site"
            }
            DeploymentAdvice::ObjectStorageRecommended => {
                "total between 20 MB and 100 MB: upload models to object storage (keeping them in the repository is still possible)"
            }
            DeploymentAdvice::ObjectStorageRequired => {
                "total > 100 MB: models must be uploaded to object storage and kept out of the repository"
            }
        })
    }
}

/// Results of a whole pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: Vec<FileResult>,
    pub skipped: Vec<SkippedFile>,
}

impl Report {
    #[must_use]
    pub fn total_original_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.original_bytes).sum()
    }

    #[must_use]
    pub fn total_optimized_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.optimized_bytes).sum()
    }

    #[must_use]
    pub fn total_reduction_percent(&self) -> f64 {
        reduction_percent(self.total_original_bytes(), self.total_optimized_bytes())
    }

    #[must_use]
    pub fn advice(&self) -> DeploymentAdvice {
        DeploymentAdvice::for_total(self.total_optimized_bytes())
    }

    /// Serialize the report, including totals and advice, as pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        #[derive(Serialize)]
        struct Summary<'a> {
            #[serde(flatten)]
            report: &'a Report,
            total_original_bytes: u64,
            total_optimized_bytes: u64,
            total_reduction_percent: f64,
            advice: DeploymentAdvice,
        }

        Ok(serde_json::to_string_pretty(&Summary {
            report: self,
            total_original_bytes: self.total_original_bytes(),
            total_optimized_bytes: self.total_optimized_bytes(),
            total_reduction_percent: self.total_reduction_percent(),
            advice: self.advice(),
        })?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:>10} {:>10} {:>9}  {}",
            "ship", "original", "optimized", "reduced", "action"
        )?;
        for file in &self.files {
            writeln!(
                f,
                "{:<10} {:>7.2} MB {:>7.2} MB {:>8.1}%  {:?}",
                file.ship.as_str(),
                megabytes(file.original_bytes),
                megabytes(file.optimized_bytes),
                file.reduction_percent(),
                file.action,
            )?;
        }
        for skipped in &self.skipped {
            writeln!(f, "{:<10} skipped: {}", skipped.ship.as_str(), skipped.reason)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "total original:  {:.2} MB",
            megabytes(self.total_original_bytes())
        )?;
        writeln!(
            f,
            "total optimized: {:.2} MB",
            megabytes(self.total_optimized_bytes())
        )?;
        writeln!(f, "total reduction: {:.1}%", self.total_reduction_percent())?;
        write!(f, "advice: {}", self.advice())
    }
}

/// Convert bytes to mebibytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

#[allow(clippy::cast_precision_loss)]
fn reduction_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - optimized as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    fn file(ship: ShipId, original: u64, optimized: u64) -> FileResult {
        FileResult {
            ship,
            action: Action::Compressed,
            original_bytes: original,
            optimized_bytes: optimized,
        }
    }

    #[test]
    fn test_advice_thresholds() {
        assert_eq!(
            DeploymentAdvice::for_total(19 * MB),
            DeploymentAdvice::SameRepository
        );
        assert_eq!(
            DeploymentAdvice::for_total(20 * MB),
            DeploymentAdvice::ObjectStorageRecommended
        );
        assert_eq!(
            DeploymentAdvice::for_total(99 * MB),
            DeploymentAdvice::ObjectStorageRecommended
        );
        assert_eq!(
            DeploymentAdvice::for_total(100 * MB),
            DeploymentAdvice::ObjectStorageRequired
        );
    }

    #[test]
    fn test_totals_and_reduction() {
        let report = Report {
            files: vec![
                file(ShipId::Naga, 40 * MB, 10 * MB),
                file(ShipId::Corax, 10 * MB, 5 * MB),
            ],
            skipped: vec![SkippedFile {
                ship: ShipId::Atron,
                reason: "missing".into(),
            }],
        };
        assert_eq!(report.total_original_bytes(), 50 * MB);
        assert_eq!(report.total_optimized_bytes(), 15 * MB);
        assert!((report.total_reduction_percent() - 70.0).abs() < 1e-9);
        assert!((report.files[1].reduction_percent() - 50.0).abs() < 1e-9);
        assert_eq!(report.advice(), DeploymentAdvice::SameRepository);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert!(report.total_reduction_percent().abs() < f64::EPSILON);
        assert_eq!(report.advice(), DeploymentAdvice::SameRepository);
    }

    #[test]
    fn test_display_and_json() {
        let report = Report {
            files: vec![file(ShipId::Thalia, 8 * MB, 2 * MB)],
            skipped: Vec::new(),
        };
        let text = report.to_string();
        assert!(text.contains("thalia"));
        assert!(text.contains("8.00 MB"));
        assert!(text.contains("75.0%"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["files"][0]["ship"], "thalia");
        assert_eq!(json["advice"], "same_repository");
        assert_eq!(json["total_optimized_bytes"], 2 * MB);
    }
}
