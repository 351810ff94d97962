use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the offending key in the DETAIL line
/// (`Key (username)=(alice) already exists.`) and names the constraint
/// `<table>_<columns>_<suffix>`. Both are used to recover which entity and
/// field a rejected write touched.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    relation_name: Regex,
    referenced_table: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            relation_name: Regex::new(r#"(?:relation|table) "([^"]+)""#).unwrap(),
            referenced_table: Regex::new(r#"is not present in table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

const CONSTRAINT_SUFFIXES: [&str; 5] = ["_pkey", "_fkey", "_key", "_check", "_idx"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into `(entity, field, value)`.
    ///
    /// ```
    /// use flock_rs::error::ConstraintParser;
    ///
    /// let parsed = ConstraintParser::parse_unique_violation(
    ///     "duplicate key value violates unique constraint \"users_username_key\"",
    ///     Some("Key (username)=(alice) already exists."),
    ///     Some("users_username_key"),
    /// );
    /// assert_eq!(
    ///     parsed,
    ///     Some(("users".to_string(), "username".to_string(), "alice".to_string()))
    /// );
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = details
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(message));

        match (constraint_name.and_then(Self::parse_constraint_name), key_value) {
            (Some((entity, _)), Some((field, value))) => Some((entity, field, value)),
            (Some((entity, field)), None) => Some((entity, field, "duplicate_value".to_string())),
            (None, Some((field, value))) => {
                let entity = Self::extract_relation(message).unwrap_or_else(|| "resource".to_string());
                Some((entity, field, value))
            }
            (None, None) => None,
        }
    }

    /// Parses a foreign key violation into `(referenced_entity, field, value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let detail_text = details.unwrap_or(message);
        let referenced = Self::patterns()
            .referenced_table
            .captures(detail_text)
            .map(|c| c[1].to_string());

        if let Some((field, value)) = Self::extract_key_value(detail_text) {
            let entity = referenced
                .or_else(|| Self::extract_relation(message))
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        constraint_name
            .and_then(Self::parse_constraint_name)
            .map(|(entity, field)| (entity, field, "invalid_reference".to_string()))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(message: &str, table_name: Option<&str>) -> Option<(String, String)> {
        let field = Self::patterns()
            .column_name
            .captures(message)
            .map(|c| c[1].to_string())?;
        let entity = table_name
            .map(str::to_string)
            .or_else(|| Self::extract_relation(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a check violation into `(entity, rule)` from the constraint name.
    pub fn parse_check_violation(message: &str, constraint_name: Option<&str>) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }
        Self::extract_relation(message).map(|entity| (entity, "check".to_string()))
    }

    /// Splits `<table>_<rest>_<suffix>` into `(table, rest)`.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))
            .unwrap_or(constraint);
        let (table, rest) = stem.split_once('_')?;
        if table.is_empty() || rest.is_empty() {
            return None;
        }
        Some((table.to_string(), rest.to_string()))
    }

    fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(text)
            .map(|c| (c[1].to_string(), c[2].to_string()))
    }

    fn extract_relation(text: &str) -> Option<String> {
        Self::patterns()
            .relation_name
            .captures(text)
            .map(|c| c[1].to_string())
    }
}
