use std::path::{Path, PathBuf};

use log::debug;

use super::{error::XsdError, uri::SchemaUri};

/// Obtains the raw bytes of a schema document.
///
/// The loader calls this at most once per distinct load URI and cache lifetime. Implementations
/// make a single attempt; any failure aborts the load.
pub trait DocumentFetcher {
    fn fetch(&self, uri: &SchemaUri) -> Result<Vec<u8>, XsdError>;
}

/// Fetches `file` URIs from disk and everything else over HTTP(S).
pub struct RemoteFetcher {
    client: reqwest::blocking::Client,
}

impl RemoteFetcher {
    pub fn new() -> Self {
        Self::with_client(reqwest::blocking::Client::new())
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for RemoteFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentFetcher for RemoteFetcher {
    fn fetch(&self, uri: &SchemaUri) -> Result<Vec<u8>, XsdError> {
        if let Some(path) = uri.file_path() {
            return read_file(&path);
        }

        let url = uri.to_string();
        debug!("fetching {url}");
        let fetch_error = |source| XsdError::Fetch {
            uri: url.clone(),
            source,
        };
        let response = self.client.get(&url).send().map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(XsdError::HttpStatus {
                uri: url.clone(),
                status,
            });
        }
        let body = response.bytes().map_err(fetch_error)?;
        Ok(body.to_vec())
    }
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, XsdError> {
    debug!("reading {}", path.display());
    std::fs::read(path).map_err(|source| XsdError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Makes sure the document at `uri` is present at `local_path`, fetching it through `fetcher`
/// only if the file does not exist yet, and returns the file's content.
pub(crate) fn mirrored(
    fetcher: &dyn DocumentFetcher,
    uri: &SchemaUri,
    local_path: &Path,
) -> Result<Vec<u8>, XsdError> {
    if !local_path.exists() {
        if let Some(dir) = local_path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| XsdError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let data = fetcher.fetch(uri)?;
        debug!("mirroring {uri} to {}", local_path.display());
        // a partially written file must never be taken for a complete mirror copy
        let mut partial = local_path.as_os_str().to_owned();
        partial.push(".part");
        let partial = PathBuf::from(partial);
        std::fs::write(&partial, &data).map_err(|source| XsdError::Io {
            path: partial.clone(),
            source,
        })?;
        std::fs::rename(&partial, local_path).map_err(|source| XsdError::Io {
            path: local_path.to_path_buf(),
            source,
        })?;
    } else {
        debug!("using mirrored copy of {uri}");
    }
    read_file(local_path)
}
