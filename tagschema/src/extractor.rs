//! Entry point wiring comment stripping, block location and field parsing.

use crate::config::ExtractorConfig;
use crate::errors::{ExtractError, Result};
use crate::naming::{NamingStrategy, SnakeCaseStrategy};
use crate::scanner::{TagMatcher, TypeSchema, locate_type_block, parse_block_with, strip_comments, type_names};

/// Extracts [`TypeSchema`]s from source text.
///
/// Holds no per-call state, so one extractor can serve many threads as long
/// as its naming strategy is stateless.
#[derive(Debug, Clone)]
pub struct Extractor<N = SnakeCaseStrategy> {
    tags: TagMatcher,
    naming: N,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Extractor with the default configuration.
    pub fn new() -> Self {
        Self::from_config(&ExtractorConfig::default())
    }

    /// Extractor using [`SnakeCaseStrategy`] configured from `config.naming`.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::with_naming(config, SnakeCaseStrategy::from(&config.naming))
    }
}

impl<N: NamingStrategy> Extractor<N> {
    /// Extractor using a caller-supplied naming strategy.
    pub fn with_naming(config: &ExtractorConfig, naming: N) -> Self {
        Self {
            tags: TagMatcher::new(&config.scanner.tag_key),
            naming,
        }
    }

    /// Extract the schema of `type_name` from `source`.
    ///
    /// Returns `Ok(None)` when the type is not declared in `source`.
    pub fn extract(&self, type_name: &str, source: &str) -> Result<Option<TypeSchema>> {
        if !is_identifier(type_name) {
            return Err(ExtractError::InvalidTypeName {
                name: type_name.to_string(),
            });
        }

        let stripped = strip_comments(source)?;
        let Some(block) = locate_type_block(type_name, &stripped)? else {
            return Ok(None);
        };
        log::debug!("located '{type_name}' ({} bytes)", block.len());

        Ok(Some(self.parse_block(block)))
    }

    /// Extract every struct type declared in `source`, in declaration order.
    ///
    /// Fails as a whole if any single type fails.
    pub fn extract_all(&self, source: &str) -> Result<Vec<TypeSchema>> {
        let stripped = strip_comments(source)?;
        let mut schemas = Vec::new();

        for type_name in type_names(&stripped) {
            if let Some(block) = locate_type_block(&type_name, &stripped)? {
                schemas.push(self.parse_block(block));
            }
        }

        Ok(schemas)
    }

    /// Parse an already located, comment-free block.
    pub fn parse_block(&self, block: &str) -> TypeSchema {
        parse_block_with(block, &self.tags, &self.naming)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"package main

// User is an account.
type User struct {
	gorm.Model
	Name     string   `json:"name,omitempty" gorm:"uniqueIndex;comment:user"`
	Token    string   `json:"token,omitempty" gorm:"-"`
	Config   []Config `json:"config,omitempty" gorm:"foreignKey:UserID;constraint:OnUpdate:CASCADE,OnDelete:CASCADE;"`
}

/* Config belongs to a user. */
type Config struct {
	UserID uint   `gorm:"primaryKey"`
	Key    string `gorm:"primaryKey;column:cfg_key"`
}
"#;

    #[test]
    fn test_extract_user() {
        let schema = Extractor::new().extract("User", SOURCE).unwrap().unwrap();
        assert_eq!(schema.type_name(), "User");
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Model", "Name", "Config"]);
        assert!(schema.field("Config").unwrap().external);
        assert_eq!(schema.unique_index("Name").unwrap().fields, ["Name"]);
        assert_eq!(schema.ignored_fields()[0].name, "Token");
    }

    #[test]
    fn test_extract_missing() {
        assert!(Extractor::new().extract("Missing", SOURCE).unwrap().is_none());
    }

    #[test]
    fn test_extract_invalid_name() {
        let err = Extractor::new().extract("User struct", SOURCE).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidTypeName { .. }));
        assert!(Extractor::new().extract("", SOURCE).is_err());
    }

    #[test]
    fn test_extract_malformed_comment() {
        let err = Extractor::new().extract("User", "/* open\ntype User struct {\n}").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedComment { offset: 0 }));
    }

    #[test]
    fn test_extract_brace_on_next_line() {
        let schema = Extractor::new().extract("A", "type A struct\n{\nID int\n}").unwrap().unwrap();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ID"]);
    }

    #[test]
    fn test_extract_all() {
        let schemas = Extractor::new().extract_all(SOURCE).unwrap();
        let names: Vec<&str> = schemas.iter().map(|s| s.type_name()).collect();
        assert_eq!(names, ["User", "Config"]);
        assert_eq!(schemas[1].primary_keys(), ["UserID", "Key"]);
        assert_eq!(schemas[1].column_name("Key"), Some("cfg_key"));
        assert_eq!(schemas[1].column_name("UserID"), Some("user_id"));
    }

    #[test]
    fn test_no_lower_case_config() {
        let config = ExtractorConfig::from_toml_str("[naming]\nno_lower_case = true\n").unwrap();
        let schema = Extractor::from_config(&config).extract("Config", SOURCE).unwrap().unwrap();
        assert_eq!(schema.column_name("UserID"), Some("UserID"));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("User"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("a.b"));
    }
}
