//! Persistence schema extraction from tag-annotated struct definitions.
//!
//! Given source text such as
//!
//! ```text
//! type User struct {
//!     ID    string `gorm:"primaryKey"`
//!     Email string `gorm:"uniqueIndex;column:mail"`
//!     Token string `gorm:"-"`
//! }
//! ```
//!
//! the [`Extractor`] produces a [`TypeSchema`] listing the fields, primary
//! keys, unique index groups and column names. Default column names come from
//! a caller-supplied [`NamingStrategy`].

pub mod config;
pub mod errors;
pub mod extractor;
pub mod naming;
pub mod scanner;

pub use config::{ExtractorConfig, NamingSettings, ScannerSettings};
pub use errors::{ExtractError, Result};
pub use extractor::Extractor;
pub use naming::{NamingStrategy, SnakeCaseStrategy};
pub use scanner::{
    Directive, FieldDescriptor, TypeSchema, UniqueIndex, locate_type_block, parse_block, strip_comments, type_names,
};
