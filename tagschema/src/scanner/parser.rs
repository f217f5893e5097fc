//! Line-oriented parser turning a located type block into a [`TypeSchema`].

use regex::Regex;
use std::sync::LazyLock;

use super::directive::{Directive, TagMatcher, TagValue, parse_directives};
use super::schema::{FieldDescriptor, SchemaBuilder, TypeSchema};
use crate::errors::{ExtractError, Result};
use crate::naming::NamingStrategy;

static STRUCT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"type\s+(\w+)\s+struct").expect("struct header pattern is valid"));

/// Parse a comment-free type block using the directive list under `tag_key`.
///
/// An empty block yields an empty schema.
pub fn parse_block(block: &str, tag_key: &str, naming: &dyn NamingStrategy) -> TypeSchema {
    parse_block_with(block, &TagMatcher::new(tag_key), naming)
}

pub(crate) fn parse_block_with(block: &str, tags: &TagMatcher, naming: &dyn NamingStrategy) -> TypeSchema {
    let mut builder = SchemaBuilder::new();

    for line in block.lines().map(str::trim) {
        if line.is_empty() || line == "{" || line == "}" {
            continue;
        }

        if builder.type_name().is_empty()
            && let Some(caps) = STRUCT_HEADER.captures(line)
        {
            builder.set_type_name(&caps[1]);
            continue;
        }

        let (declaration, tag) = split_tag(line);
        let mut field = match parse_declaration(&declaration) {
            Ok((name, declared_type)) => FieldDescriptor::new(name, declared_type),
            Err(err) => {
                log::warn!("{}: skipping line: {err}", builder.type_name());
                continue;
            }
        };

        let directives = match tag.and_then(|tag| tags.value(tag)) {
            Some(TagValue::Ignored) => {
                log::debug!("{}.{} is ignored", builder.type_name(), field.name);
                builder.push_ignored(field);
                continue;
            }
            Some(TagValue::Directives(body)) => parse_directives(body),
            None => Vec::new(),
        };

        apply_directives(&mut builder, &mut field, &directives);

        if !field.external {
            let column = match builder.column_override(&field.name) {
                Some(column) => column.to_string(),
                None => naming.column_name(builder.type_name(), &field.name),
            };
            field.column = Some(column);
        }

        builder.push_field(field);
    }

    builder.build()
}

fn apply_directives(builder: &mut SchemaBuilder, field: &mut FieldDescriptor, directives: &[Directive]) {
    for directive in directives {
        match directive {
            Directive::PrimaryKey => builder.add_primary_key(&field.name),
            Directive::UniqueIndex { group: Some(group) } => builder.add_to_unique_index(group, &field.name),
            Directive::UniqueIndex { group: None } => builder.start_unique_index(&field.name, &field.name),
            Directive::Column(column) => builder.set_column_override(&field.name, column),
            Directive::ForeignKey(_) => {
                // Relations are not columns of this type.
                field.external = true;
                builder.discard_column_override(&field.name);
                break;
            }
            // TODO: apply embeddedPrefix once embedded structs are expanded into their fields.
            Directive::EmbeddedPrefix(_) => {}
            Directive::Other { key, .. } => {
                log::trace!("{}.{}: unrecognized directive '{key}'", builder.type_name(), field.name);
            }
        }
    }
}

/// Split a field line into its declaration and the inner text of its last
/// backtick-delimited tag.
fn split_tag(line: &str) -> (String, Option<&str>) {
    let Some(end) = line.rfind('`') else {
        return (line.to_string(), None);
    };
    let Some(start) = line[..end].rfind('`') else {
        return (line.to_string(), None);
    };

    let declaration = format!("{} {}", &line[..start], &line[end + 1..]);
    (declaration, Some(&line[start + 1..end]))
}

/// Reduce a declaration to `(name, type)`. A single token is an embedded
/// field named after the last segment of its type.
fn parse_declaration(declaration: &str) -> Result<(String, String)> {
    let tokens: Vec<&str> = declaration.split_whitespace().collect();
    let malformed = || ExtractError::MalformedDeclaration {
        line: tokens.join(" "),
    };

    match tokens.as_slice() {
        [name, declared_type] => Ok((name.to_string(), declared_type.to_string())),
        [embedded] => {
            let name = embedded
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .trim_start_matches('*');
            if name.is_empty() {
                return Err(malformed());
            }
            Ok((name.to_string(), embedded.to_string()))
        }
        _ => Err(malformed()),
    }
}
