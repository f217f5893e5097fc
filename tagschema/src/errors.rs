use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting a schema or loading extractor configuration.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A `/*` opener has no `*/` after it.
    #[error("unterminated block comment starting at byte {offset}")]
    MalformedComment { offset: usize },

    /// The source ended before the type body's closing brace.
    #[error("type '{type_name}' has an unbalanced brace body")]
    UnbalancedBraces { type_name: String },

    /// A field line did not reduce to `name type` or a single embedded type.
    ///
    /// Recoverable: the parser logs it and skips the line.
    #[error("malformed field declaration: {line:?}")]
    MalformedDeclaration { line: String },

    /// The requested type name is not a plain identifier.
    #[error("invalid type name: {name:?}")]
    InvalidTypeName { name: String },

    /// The header pattern built for a type name could not be compiled.
    #[error("failed to build type header pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
