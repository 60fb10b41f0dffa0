use crate::scene::SceneTuning;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

pub const TUNING_ENV: &str = "THOUGHTFORM_TUNING";

pub fn save_tuning_to_file(tuning: &SceneTuning, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(tuning)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_tuning_from_file(path: &Path) -> Result<SceneTuning> {
    let json = std::fs::read_to_string(path)?;
    let tuning: SceneTuning = serde_json::from_str(&json)?;
    Ok(tuning)
}

/// CLI argument first, then the environment variable.
pub fn tuning_path(cli_arg: Option<String>, env_value: Option<String>) -> Option<PathBuf> {
    cli_arg
        .or(env_value)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Resolves tuning for startup. Never fails: problems are logged and defaults used.
pub fn resolve_tuning(path: Option<&Path>) -> SceneTuning {
    let Some(path) = path else {
        log::info!("Using built-in scene tuning");
        return SceneTuning::default();
    };
    match load_tuning_from_file(path) {
        Ok(tuning) => {
            log::info!("Loaded scene tuning from {}", path.display());
            tuning
        }
        Err(err) => {
            log::warn!(
                "Failed to load scene tuning from {}: {}; using defaults",
                path.display(),
                err
            );
            SceneTuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!(
            "thoughtform_{}_{}_{}.json",
            tag,
            std::process::id(),
            nonce
        ));
        path
    }

    #[test]
    fn test_tuning_save_then_load_via_file() {
        let mut tuning = SceneTuning::default();
        tuning.hover_scale = 1.2;
        tuning.background_street = [1, 2, 3];
        let path = temp_path("roundtrip");

        save_tuning_to_file(&tuning, &path).unwrap();
        let loaded = load_tuning_from_file(&path).unwrap();
        assert_eq!(loaded, tuning);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_malformed_file_reports_json_error() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let result = load_tuning_from_file(&path);
        assert!(matches!(result, Err(SerializationError::Json(_))));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        assert!(matches!(
            load_tuning_from_file(&path),
            Err(SerializationError::Io(_))
        ));
        assert_eq!(resolve_tuning(Some(&path)), SceneTuning::default());
    }

    #[test]
    fn test_cli_argument_wins_over_environment() {
        let path = tuning_path(Some("a.json".into()), Some("b.json".into()));
        assert_eq!(path, Some(PathBuf::from("a.json")));
        let path = tuning_path(None, Some("b.json".into()));
        assert_eq!(path, Some(PathBuf::from("b.json")));
        assert_eq!(tuning_path(None, Some("  ".into())), None);
    }
}
