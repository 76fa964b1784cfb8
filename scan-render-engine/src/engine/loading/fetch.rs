use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use bevy::asset::io::file::FileAssetReader;

use crate::engine::error::FetchError;

/// Delivers raw scan bytes for a location. Transport is an external concern;
/// implementations only need to be callable from a worker thread.
pub trait ScanFetcher: Send + Sync + 'static {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads locations as paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root a relative path at the same base directory the asset server
    /// reads from.
    pub fn from_asset_root(root: &str) -> Self {
        Self::new(FileAssetReader::get_base_path().join(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ScanFetcher for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.root.join(location);
        std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound {
                location: path.display().to_string(),
            },
            _ => FetchError::Io {
                location: path.display().to_string(),
                source,
            },
        })
    }
}

/// Serves payloads registered up front.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    payloads: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn with(mut self, location: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.payloads.insert(location.into(), bytes);
        self
    }
}

impl ScanFetcher for MemoryFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, FetchError> {
        self.payloads
            .get(location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                location: location.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::path::{ASSET_ROOT, ENGINE_CONFIG_PATH};

    #[test]
    fn file_fetcher_reports_missing_files() {
        let fetcher = FileFetcher::new(std::env::temp_dir());
        let err = fetcher.fetch("no-such-scan-payload.json").unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn asset_root_matches_the_asset_server_base() {
        let fetcher = FileFetcher::from_asset_root(ASSET_ROOT);
        assert_eq!(fetcher.root(), FileAssetReader::get_base_path().join(ASSET_ROOT));

        let config = fetcher.fetch(ENGINE_CONFIG_PATH).unwrap();
        assert!(!config.is_empty());
    }

    #[test]
    fn file_fetcher_reads_relative_to_root() {
        let root = std::env::temp_dir().join("scan-render-engine-fetch-test");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("scan.json"), b"{}").unwrap();

        let bytes = FileFetcher::new(&root).fetch("scan.json").unwrap();
        assert_eq!(bytes, b"{}");
    }
}
