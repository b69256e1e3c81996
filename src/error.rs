use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning raw bytes into an element tree.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error at position {position}: {source}")]
    Xml {
        position: u64,
        source: quick_xml::Error,
    },
    #[error("unbalanced element '{0}'")]
    Unbalanced(String),
}

/// Everything that can make a track file unusable, plus the scan-level
/// failure of not being able to list the input directory.
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing element: {0}")]
    Structure(&'static str),
    #[error("strange data in the track's name field: '{0}'")]
    Naming(String),
    #[error("track point {point} in segment {segment} has a missing or non-numeric '{attribute}' attribute")]
    Attribute {
        segment: usize,
        point: usize,
        attribute: &'static str,
    },
    #[error("malformed timestamp '{text}' in segment {segment}, expected YYYY-MM-DDTHH:MM:SSZ")]
    Timestamp { segment: usize, text: String },
    #[error("no distance covered")]
    EmptyTrack,
    #[error("failed to load file: {0}")]
    FileLoad(#[from] DocumentError),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
