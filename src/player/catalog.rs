use super::{episode::Episode, error::PlayerError};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Episode>),
    Wrapped { episodes: Vec<Episode> },
}

/// Reads episodes from a JSON file holding either a bare array or an
/// object with an `episodes` array.
pub fn load_episodes(path: impl AsRef<Path>) -> Result<Vec<Episode>, PlayerError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| PlayerError::CatalogIo {
        path: path.to_path_buf(),
        source,
    })?;

    let episodes = match serde_json::from_str(&raw) {
        Ok(CatalogFile::List(episodes)) | Ok(CatalogFile::Wrapped { episodes }) => episodes,
        Err(source) => {
            return Err(PlayerError::CatalogFormat {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    info!(
        path = %path.display(),
        count = episodes.len(),
        "catalog_loaded"
    );
    Ok(episodes)
}
