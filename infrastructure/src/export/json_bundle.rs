//! Pretty-printed JSON file exporter for [`ResultBundle`]

use advisor_application::{ExportError, ResultExporter};
use advisor_domain::ResultBundle;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes bundles as JSON files
///
/// Without an explicit file the bundle goes to
/// `<directory>/glp1_analysis_<stamp>.json`.
#[derive(Debug, Clone)]
pub struct JsonBundleExporter {
    directory: PathBuf,
    file: Option<PathBuf>,
}

impl JsonBundleExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file: None,
        }
    }

    /// Write to exactly this path instead of a stamped name
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            directory: PathBuf::from("."),
            file: Some(path.into()),
        }
    }

    fn target(&self, bundle: &ResultBundle) -> PathBuf {
        match &self.file {
            Some(path) => path.clone(),
            None => self.directory.join(bundle.file_name()),
        }
    }
}

impl ResultExporter for JsonBundleExporter {
    fn export(&self, bundle: &ResultBundle) -> Result<PathBuf, ExportError> {
        let path = self.target(bundle);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(bundle)?;
        fs::write(&path, json)?;
        info!("Exported results to {}", path.display());
        Ok(path)
    }
}

/// Load a previously exported bundle
pub fn read_bundle(path: &Path) -> Result<ResultBundle, ExportError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::{
        AnalysisReport, AnalysisSource, AssessmentReport, Condition, Demographics, Gender,
        PatientProfile, RemoteAnalysis, assess,
    };
    use serde_json::json;

    fn bundle(remote: RemoteAnalysis) -> ResultBundle {
        let profile = PatientProfile::new(Demographics {
            age: 52,
            gender: Gender::Female,
            bmi: 33.5,
            weight: 92.0,
        })
        .with_condition(Condition::Obesity);
        let verdict = assess(&profile);
        let report = AssessmentReport::new(profile, AnalysisSource::Demo, 1, remote, verdict);
        ResultBundle::from_report(&report)
    }

    #[test]
    fn test_export_to_directory_uses_stamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = JsonBundleExporter::new(dir.path());
        let bundle = bundle(RemoteAnalysis::Completed(AnalysisReport::from_payload(
            json!({ "Conditions": [] }),
        )));

        let path = exporter.export(&bundle).unwrap();

        assert_eq!(path, dir.path().join(bundle.file_name()));
        assert_eq!(read_bundle(&path).unwrap(), bundle);
    }

    #[test]
    fn test_export_to_explicit_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out").join("result.json");
        let exporter = JsonBundleExporter::to_file(&target);
        let bundle = bundle(RemoteAnalysis::Failed {
            error: "Request timeout".to_string(),
        });

        let path = exporter.export(&bundle).unwrap();

        assert_eq!(path, target);
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["api_results"].is_null());
        assert_eq!(raw["source"], "demo");
        assert_eq!(raw["glp1_assessment"]["level"], "high");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_bundle(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
