//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Xml(quick_xml::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// A required input (dump, lexicon, corpus) does not exist.
    MissingInput(PathBuf),
    /// A chunk could not find the start of the next page within the allowed read-ahead.
    Resync { chunk: usize, distance: u64 },
    /// Input ended while a page was still open. Holds the page title.
    Truncated(String),
    Custom(String),
}

impl Error {
    /// Malformed source content, recovered by skipping the offending page/chunk.
    ///
    /// Anything else (I/O, configuration) is fatal to the run.
    pub fn is_source_format(&self) -> bool {
        matches!(
            self,
            Error::Xml(_) | Error::Resync { .. } | Error::Truncated(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Xml(e) => write!(f, "malformed markup: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::ThreadPool(e) => write!(f, "could not build thread pool: {}", e),
            Error::MissingInput(p) => write!(f, "input file not found: {:?}", p),
            Error::Resync { chunk, distance } => write!(
                f,
                "chunk {}: no page boundary found within {} bytes past the chunk end",
                chunk, distance
            ),
            Error::Truncated(title) => write!(f, "input ended inside page {:?}", title),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Error {
        match e {
            // keep disk failures apart from markup failures
            quick_xml::Error::Io(io) => Error::Io(std::io::Error::new(io.kind(), io.to_string())),
            e => Error::Xml(e),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Error {
        Error::ThreadPool(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
