use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use super::error::XsdError;

pub const PROTOCOL_SEPARATOR: &str = "://";
pub const DEFAULT_SCHEME: &str = "http";
pub const FILE_SCHEME: &str = "file";

/// The normalized location a schema is loaded from.
///
/// `Display` yields the serialized URL, which is also the load cache key. The local mirror
/// layout is derived from host and path only, so it does not depend on the protocol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SchemaUri {
    url: Url,
}

impl fmt::Display for SchemaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl SchemaUri {
    /// Parses `uri`, assuming `http` when it has no scheme.
    pub fn parse(uri: &str) -> Result<Self, XsdError> {
        let uri = uri.trim();
        let parsed = if uri.contains(PROTOCOL_SEPARATOR) {
            Url::parse(uri)
        } else {
            Url::parse(&format!("{DEFAULT_SCHEME}{PROTOCOL_SEPARATOR}{uri}"))
        };
        parsed
            .map(|url| Self { url })
            .map_err(|source| XsdError::InvalidUri {
                uri: uri.to_string(),
                source,
            })
    }

    /// A `file` URI for a local path. Relative paths are made absolute against the current
    /// directory.
    pub fn from_file_path(path: &Path) -> Result<Self, XsdError> {
        let absolute = path.canonicalize().or_else(|_| {
            std::env::current_dir().map(|cwd| cwd.join(path))
        });
        let absolute = absolute.map_err(|source| XsdError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Url::from_file_path(&absolute)
            .map(|url| Self { url })
            .map_err(|()| XsdError::InvalidFilePath(absolute))
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Everything after `scheme://`.
    pub fn path(&self) -> &str {
        let serialized = self.url.as_str();
        serialized
            .split_once(PROTOCOL_SEPARATOR)
            .map_or(serialized, |(_, rest)| rest)
    }

    pub fn is_file(&self) -> bool {
        self.url.scheme() == FILE_SCHEME
    }

    /// Resolves a `schemaLocation` found in the document at `self`. A relative location is
    /// resolved against the directory of `self`; `..` never climbs above the host.
    pub fn join(&self, location: &str) -> Result<Self, XsdError> {
        let location = location.trim();
        self.url
            .join(location)
            .map(|url| Self { url })
            .map_err(|source| XsdError::InvalidUri {
                uri: location.to_string(),
                source,
            })
    }

    /// The path of this URI inside the mirror directory: host (with port, if any) followed by
    /// the path segments.
    pub fn local_path(&self, mirror_dir: &Path) -> PathBuf {
        let mut local = mirror_dir.to_path_buf();
        if let Some(host) = self.url.host_str() {
            match self.url.port() {
                Some(port) => local.push(format!("{host}_{port}")),
                None => local.push(host),
            }
        }
        for segment in self
            .url
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
        {
            let segment = if segment == ".." { "__" } else { segment };
            local.push(segment.replace(':', "_"));
        }
        local
    }

    /// The filesystem path of a `file` URI.
    pub fn file_path(&self) -> Option<PathBuf> {
        if !self.is_file() {
            return None;
        }
        self.url.to_file_path().ok()
    }
}
