use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlockforgeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Failed to fetch registry: {0}")]
    RemoteFetchError(String),

    /// A componentName that is not a valid identifier in generated output.
    /// `author` is set when the entry came from an author namespace.
    #[error("Invalid component name '{name}'{}", author_suffix(.author))]
    InvalidIdentifier {
        name: String,
        author: Option<String>,
    },

    #[error("Invalid author handle '{0}'")]
    InvalidAuthor(String),

    #[error("Malformed registry entry '{component}': {reason}")]
    MalformedEntry { component: String, reason: String },
}

fn author_suffix(author: &Option<String>) -> String {
    match author {
        Some(a) => format!(" (author '{}')", a),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, BlockforgeError>;
