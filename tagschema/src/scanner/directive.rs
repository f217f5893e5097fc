//! Tokenizer for struct tag directive lists such as
//! `primaryKey;column:user_id;uniqueIndex:ui_ab,priority:1`.

use regex::Regex;

/// One persistence directive from a field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `primaryKey`
    PrimaryKey,
    /// `uniqueIndex` or `uniqueIndex:<group>[,options]`
    UniqueIndex { group: Option<String> },
    /// `column:<name>`
    Column(String),
    /// `foreignKey:<target>`
    ForeignKey(String),
    /// `embeddedPrefix:<prefix>`, recognized but not applied.
    EmbeddedPrefix(String),
    /// Anything outside the recognized vocabulary.
    Other { key: String, value: Option<String> },
}

impl Directive {
    /// Classify a single `key[:value]` item. Keys are case-insensitive.
    fn from_item(item: &str) -> Self {
        let (key, value) = match item.split_once(':') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (item, None),
        };

        match (key.to_ascii_lowercase().as_str(), value) {
            ("primarykey", None) => Directive::PrimaryKey,
            ("uniqueindex", None) => Directive::UniqueIndex { group: None },
            ("uniqueindex", Some(value)) => {
                let group = value.split(',').next().unwrap_or_default().trim();
                Directive::UniqueIndex {
                    group: (!group.is_empty()).then(|| group.to_string()),
                }
            }
            ("column", Some(name)) => Directive::Column(name.to_string()),
            ("foreignkey", Some(target)) => Directive::ForeignKey(target.to_string()),
            ("embeddedprefix", Some(prefix)) => Directive::EmbeddedPrefix(prefix.to_string()),
            _ => Directive::Other {
                key: key.to_string(),
                value: value.map(str::to_string),
            },
        }
    }
}

/// Split a directive list on `;` and classify every non-empty item.
pub fn parse_directives(body: &str) -> Vec<Directive> {
    body.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(Directive::from_item)
        .collect()
}

/// Matches `<key>:"<value>"` inside a struct tag for one tag key.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    pattern: Regex,
}

/// The directive list carried by one field tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue<'a> {
    /// The value starts with `-`: the field is excluded from the schema.
    Ignored,
    /// A non-empty directive list.
    Directives(&'a str),
}

impl TagMatcher {
    pub fn new(tag_key: &str) -> Self {
        let pattern = format!(r#"(?:^|\s){}:"([^"]*)""#, regex::escape(tag_key));
        Self {
            pattern: Regex::new(&pattern).expect("escaped tag key always forms a valid pattern"),
        }
    }

    /// Extract the value for this matcher's key from the tag's inner text.
    /// Returns `None` when the key is absent or its value is empty.
    pub fn value<'a>(&self, tag: &'a str) -> Option<TagValue<'a>> {
        let value = self.pattern.captures(tag)?.get(1)?.as_str();
        if value.starts_with('-') {
            Some(TagValue::Ignored)
        } else if value.trim().is_empty() {
            None
        } else {
            Some(TagValue::Directives(value))
        }
    }
}
