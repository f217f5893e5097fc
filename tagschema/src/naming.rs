//! Column naming strategies.
//!
//! The extractor never derives column names itself; it asks a [`NamingStrategy`]
//! for every persisted field that has no explicit `column:` override.

use crate::config::NamingSettings;

/// Converts a declared field name into its default column name.
///
/// Implementations must be deterministic and free of side effects so that
/// extractions can run in parallel.
pub trait NamingStrategy: Send + Sync {
    fn column_name(&self, type_name: &str, field_name: &str) -> String;
}

impl<F> NamingStrategy for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn column_name(&self, type_name: &str, field_name: &str) -> String {
        self(type_name, field_name)
    }
}

/// Initialisms rewritten to title case before splitting words. Order matters:
/// at each position the first entry that matches wins.
const COMMON_INITIALISMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP", "JSON", "LHS", "QPS",
    "RAM", "RHS", "RPC", "SLA", "SMTP", "SSH", "TLS", "TTL", "UID", "UI", "UUID", "URI", "URL", "UTF8", "VM", "XML",
    "XSRF", "XSS",
];

/// The usual ORM convention: `UserID` -> `user_id`, `IsWT` -> `is_wt`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnakeCaseStrategy {
    /// Return field names unchanged.
    pub no_lower_case: bool,
}

impl From<&NamingSettings> for SnakeCaseStrategy {
    fn from(settings: &NamingSettings) -> Self {
        Self {
            no_lower_case: settings.no_lower_case,
        }
    }
}

impl NamingStrategy for SnakeCaseStrategy {
    fn column_name(&self, _type_name: &str, field_name: &str) -> String {
        if self.no_lower_case {
            return field_name.to_string();
        }
        to_db_name(field_name)
    }
}

fn replace_initialisms(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    'outer: while !rest.is_empty() {
        for initialism in COMMON_INITIALISMS {
            if let Some(tail) = rest.strip_prefix(initialism) {
                out.push_str(&initialism[..1]);
                out.push_str(&initialism[1..].to_ascii_lowercase());
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

fn to_db_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let value: Vec<char> = replace_initialisms(name).chars().collect();
    let last = value.len() - 1;
    let mut buf = String::with_capacity(value.len() + 4);
    let mut last_upper = false;
    let mut cur_upper = value[0].is_ascii_uppercase();

    for i in 0..last {
        let next = value[i + 1];
        let next_upper = next.is_ascii_uppercase();
        let next_digit = next.is_ascii_digit();

        if cur_upper {
            let inside_run = last_upper && (next_upper || next_digit);
            if !inside_run && i > 0 && value[i - 1] != '_' && next != '_' {
                buf.push('_');
            }
            buf.push(value[i].to_ascii_lowercase());
        } else {
            buf.push(value[i]);
        }

        last_upper = cur_upper;
        cur_upper = next_upper;
    }

    if cur_upper {
        if !last_upper && value.len() > 1 {
            buf.push('_');
        }
        buf.push(value[last].to_ascii_lowercase());
    } else {
        buf.push(value[last]);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_db_name() {
        assert_eq!(to_db_name("ID"), "id");
        assert_eq!(to_db_name("UserID"), "user_id");
        assert_eq!(to_db_name("CreatedAt"), "created_at");
        assert_eq!(to_db_name("HTTPRequest"), "http_request");
        assert_eq!(to_db_name("IsWT"), "is_wt");
        assert_eq!(to_db_name("Mother1"), "mother1");
        assert_eq!(to_db_name("X"), "x");
        assert_eq!(to_db_name("ABC"), "abc");
        assert_eq!(to_db_name("already_snake"), "already_snake");
        assert_eq!(to_db_name(""), "");
    }

    #[test]
    fn test_replace_initialisms() {
        assert_eq!(replace_initialisms("UserID"), "UserId");
        assert_eq!(replace_initialisms("HTTPSProxy"), "HttpSProxy");
        assert_eq!(replace_initialisms("UIDValue"), "UidValue");
        assert_eq!(replace_initialisms("Name"), "Name");
    }

    #[test]
    fn test_no_lower_case() {
        let strategy = SnakeCaseStrategy { no_lower_case: true };
        assert_eq!(strategy.column_name("User", "UserID"), "UserID");
    }

    #[test]
    fn test_closure_strategy() {
        let strategy = |type_name: &str, field: &str| format!("{}_{}", type_name.to_lowercase(), field.to_lowercase());
        assert_eq!(strategy.column_name("User", "Name"), "user_name");
    }
}
