//! Text scanning pipeline for tag-annotated struct definitions.
//!
//! This module provides functionality to:
//! - Strip comments from declaration source
//! - Locate a named type's brace-delimited block
//! - Parse field declarations and their directive tags into a schema

mod comments;
mod directive;
mod locator;
mod parser;
mod schema;

pub use comments::strip_comments;
pub use directive::{Directive, TagMatcher, TagValue, parse_directives};
pub use locator::{locate_type_block, type_names};
pub use parser::parse_block;
pub(crate) use parser::parse_block_with;
pub use schema::{FieldDescriptor, SchemaBuilder, TypeSchema, UniqueIndex};
