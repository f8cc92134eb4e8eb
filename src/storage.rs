use crate::errors::AppError;
use crate::models::PersistedSnapshot;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

/// Fixed identifier the snapshot is stored under.
pub const STORAGE_KEY: &str = "personal-dashboard-v1";

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    let dir = env::var("APP_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    Ok(PathBuf::from(dir).join(format!("{STORAGE_KEY}.json")))
}

/// Reads the stored snapshot. Anything unreadable counts as no snapshot.
pub async fn load_snapshot(path: &Path) -> Option<PersistedSnapshot> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(path = %path.display(), "ignoring malformed snapshot: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!(path = %path.display(), "failed to read snapshot: {err}");
            None
        }
    }
}

pub async fn persist_snapshot(path: &Path, snapshot: &PersistedSnapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(snapshot).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn unique_temp_path(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "habit_tracker_{label}_{}_{nanos}",
        std::process::id()
    ));
    path.push(format!("{STORAGE_KEY}.json"));
    path
}
