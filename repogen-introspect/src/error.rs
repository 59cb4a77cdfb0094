use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{path}'")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{file}:{line}: failed to parse Rust source")]
    Parse {
        file: String,
        line: usize,
        #[source]
        source: syn::Error,
    },

    #[error("{file}:{line}: #[{marker}] expects a single string literal, e.g. #[{marker}(\"...\")]")]
    MalformedMarker {
        file: String,
        line: usize,
        marker: String,
    },
}
