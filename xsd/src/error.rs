use std::path::PathBuf;

use thiserror::Error;

/// Every way loading or resolving a schema graph can fail.
///
/// All variants are terminal for the load in progress: a failure anywhere in the transitive
/// include chain is surfaced to the caller of [`SchemaLoader::load_schema()`](crate::SchemaLoader::load_schema).
#[derive(Debug, Error)]
pub enum XsdError {
    #[error("invalid schema URI {uri:?}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{} cannot be expressed as a file URI", .0.display())]
    InvalidFilePath(PathBuf),
    #[error("failed to fetch {uri}")]
    Fetch {
        uri: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {uri} returned HTTP status {status}")]
    HttpStatus {
        uri: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create mirror directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{uri} is not well-formed XML")]
    Parse {
        uri: String,
        #[source]
        source: roxmltree::Error,
    },
    #[error("{uri} has root element {found:?}, expected an XSD <schema>")]
    NotASchema { uri: String, found: String },
    #[error("include cycle detected: {}", chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },
    #[error("Failed to resolve prefix {0:?} to a namespace URI")]
    NamePrefixNotResolved(String),
    #[error("invalid value {value:?} for attribute {attribute}")]
    InvalidValue { attribute: &'static str, value: String },
}
