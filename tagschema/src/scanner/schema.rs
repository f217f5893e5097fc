//! Schema types produced by the extractor, and the builder that assembles them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Complete persistence schema extracted from one type definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    type_name: String,
    fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ignored_fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    primary_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unique_indices: Vec<UniqueIndex>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    column_overrides: BTreeMap<String, String>,
}

impl TypeSchema {
    /// Name of the type (empty for a schema parsed from an empty block).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Persisted and external fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields excluded by the ignore sentinel.
    pub fn ignored_fields(&self) -> &[FieldDescriptor] {
        &self.ignored_fields
    }

    /// Primary key field names, in declaration order.
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// Unique index groups in the order they were first seen.
    pub fn unique_indices(&self) -> &[UniqueIndex] {
        &self.unique_indices
    }

    /// Explicit `column:` overrides, keyed by field name.
    pub fn column_overrides(&self) -> &BTreeMap<String, String> {
        &self.column_overrides
    }

    /// Look up a persisted or external field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look up a unique index group by name.
    pub fn unique_index(&self, name: &str) -> Option<&UniqueIndex> {
        self.unique_indices.iter().find(|index| index.name == name)
    }

    /// Effective column name of a field, if it maps to a column of this type.
    pub fn column_name(&self, field: &str) -> Option<&str> {
        self.field(field)?.column.as_deref()
    }

    /// True for the schema of an empty or absent block.
    pub fn is_empty(&self) -> bool {
        self.type_name.is_empty() && self.fields.is_empty() && self.ignored_fields.is_empty()
    }
}

impl fmt::Display for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.type_name)?;
        for field in self.fields.iter().chain(&self.ignored_fields) {
            writeln!(f, "{field}")?;
        }

        if !self.unique_indices.is_empty() {
            writeln!(f, "UniqueIndices:")?;
            for index in &self.unique_indices {
                writeln!(f, "{} {}", index.name, index.fields.join("+"))?;
            }
        }

        if !self.primary_keys.is_empty() {
            writeln!(f, "PrimaryKeys: {}", self.primary_keys.join("+"))?;
        }

        let mut columns = self
            .fields
            .iter()
            .filter_map(|field| field.column.as_deref().map(|column| (&field.name, column)))
            .peekable();
        if columns.peek().is_some() {
            writeln!(f, "Column names:")?;
            for (field, column) in columns {
                writeln!(f, "{field} {column}")?;
            }
        }

        Ok(())
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared (embedded fields use their type name)
    pub name: String,

    /// Type expression as written (e.g. `*IdentifiedGenotypes`, `[]byte`)
    #[serde(rename = "type")]
    pub declared_type: String,

    /// Excluded from the schema by the ignore sentinel
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignored: bool,

    /// Relation to another type rather than a column of this one
    #[serde(default, skip_serializing_if = "is_false")]
    pub external: bool,

    /// Effective column name; `None` for ignored and external fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            ignored: false,
            external: false,
            column: None,
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t", self.name, self.declared_type)?;
        if self.ignored {
            write!(f, "ignored\t")?;
        }
        if self.external {
            write!(f, "external\t")?;
        }
        Ok(())
    }
}

/// Fields whose combined values must be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIndex {
    /// Group name (the field name for a bare `uniqueIndex`)
    pub name: String,

    /// Member field names in declaration order
    pub fields: Vec<String>,
}

/// Accumulates parsed fields into a [`TypeSchema`].
///
/// State lives only as long as one parse; [`SchemaBuilder::build`] consumes it.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: TypeSchema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_name(&self) -> &str {
        &self.schema.type_name
    }

    pub fn set_type_name(&mut self, name: impl Into<String>) {
        self.schema.type_name = name.into();
    }

    pub fn push_field(&mut self, field: FieldDescriptor) {
        self.schema.fields.push(field);
    }

    pub fn push_ignored(&mut self, mut field: FieldDescriptor) {
        field.ignored = true;
        field.column = None;
        self.schema.ignored_fields.push(field);
    }

    pub fn add_primary_key(&mut self, field: &str) {
        if !self.schema.primary_keys.iter().any(|key| key == field) {
            self.schema.primary_keys.push(field.to_string());
        }
    }

    /// Append `field` to the named group, creating the group if needed.
    pub fn add_to_unique_index(&mut self, group: &str, field: &str) {
        match self.schema.unique_indices.iter_mut().find(|index| index.name == group) {
            Some(index) => {
                if !index.fields.iter().any(|existing| existing == field) {
                    index.fields.push(field.to_string());
                }
            }
            None => self.schema.unique_indices.push(UniqueIndex {
                name: group.to_string(),
                fields: vec![field.to_string()],
            }),
        }
    }

    /// Start a group containing only `field`, replacing any members already
    /// collected under `group`.
    pub fn start_unique_index(&mut self, group: &str, field: &str) {
        let fields = vec![field.to_string()];
        match self.schema.unique_indices.iter_mut().find(|index| index.name == group) {
            Some(index) => index.fields = fields,
            None => self.schema.unique_indices.push(UniqueIndex {
                name: group.to_string(),
                fields,
            }),
        }
    }

    pub fn set_column_override(&mut self, field: &str, column: &str) {
        self.schema
            .column_overrides
            .insert(field.to_string(), column.to_string());
    }

    pub fn discard_column_override(&mut self, field: &str) {
        self.schema.column_overrides.remove(field);
    }

    pub fn column_override(&self, field: &str) -> Option<&str> {
        self.schema.column_overrides.get(field).map(String::as_str)
    }

    pub fn build(self) -> TypeSchema {
        self.schema
    }
}
