//! Loading and storing the three JSON artifacts.
//!
//! Artifacts written by older runs may lack fields added since; every domain
//! struct carries serde defaults, so a missing field resolves to its
//! documented zero value here rather than failing. Malformed JSON and
//! filesystem failures surface as errors to the caller and are never retried.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{FilteredProfile, PredictiveProfile, TranslatedProfile};
use crate::error::Result;
use crate::fs::FileSystem;

/// Default file name of the filtered-profile artifact.
pub const FILTERED_ARTIFACT: &str = "filtered.json";
/// Default file name of the translated-profile artifact.
pub const TRANSLATED_ARTIFACT: &str = "translated.json";
/// Default file name of the predictive-profile artifact.
pub const PREDICTIVE_ARTIFACT: &str = "predictive.json";

/// Load a filtered profile from a JSON artifact.
pub fn load_filtered_profile<F: FileSystem>(fs: &F, path: &Path) -> Result<FilteredProfile> {
    load_artifact(fs, path)
}

/// Load a translated profile from a JSON artifact.
pub fn load_translated_profile<F: FileSystem>(fs: &F, path: &Path) -> Result<TranslatedProfile> {
    load_artifact(fs, path)
}

/// Load a predictive profile from a JSON artifact.
pub fn load_predictive_profile<F: FileSystem>(fs: &F, path: &Path) -> Result<PredictiveProfile> {
    load_artifact(fs, path)
}

/// Serialize a payload as pretty JSON and write it to `path`.
pub fn save_artifact<F: FileSystem, T: Serialize>(fs: &F, path: &Path, payload: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(payload)?;
    fs.write_string(path, &contents)
}

fn load_artifact<F: FileSystem, T: DeserializeOwned>(fs: &F, path: &Path) -> Result<T> {
    let contents = fs.read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FilteredProfile;
    use crate::error::DevScopeError;
    use crate::fs::MockFileSystem;
    use std::path::Path;

    #[test]
    fn load_substitutes_defaults_for_missing_fields() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("{\"total_commits\": 4}".to_string()));

        let profile = load_filtered_profile(&fs, Path::new("filtered.json")).expect("load");

        assert_eq!(profile.total_commits, 4);
        assert!(profile.repositories.is_empty());
        assert!(profile.commit_dates.is_empty());
    }

    #[test]
    fn load_surfaces_malformed_json() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("not json at all".to_string()));

        let error =
            load_translated_profile(&fs, Path::new("translated.json")).expect_err("must fail");
        assert!(matches!(error, DevScopeError::Json(_)));
    }

    #[test]
    fn load_surfaces_io_errors() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string().returning(|_| {
            Err(DevScopeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )))
        });

        let error =
            load_predictive_profile(&fs, Path::new("predictive.json")).expect_err("must fail");
        assert!(matches!(error, DevScopeError::Io(_)));
    }

    #[test]
    fn save_writes_pretty_json() {
        let mut fs = MockFileSystem::new();
        fs.expect_write_string()
            .withf(|path, contents| {
                path == Path::new("out/filtered.json") && contents.contains("\"total_commits\": 0")
            })
            .returning(|_, _| Ok(()));

        save_artifact(&fs, Path::new("out/filtered.json"), &FilteredProfile::default())
            .expect("save");
    }
}
