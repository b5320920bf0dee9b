use entity_value::EntityValue;
use itertools::Itertools;
use std::{error::Error as StdError, fmt};

/// Values longer than this are truncated when parameters are printed.
const MAX_PRINTED_VALUE_LENGTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => f.write_str("SQLite"),
        }
    }
}

/// A failed statement together with what was sent to the store.
///
/// Renders as a short message, a blank line, and one block per piece of context:
///
/// ```text
/// SQLite error: no such table: t
///
/// Statement:
///   SELECT * FROM t WHERE id = ?
/// Parameters:
///   1:  42
/// ```
#[derive(Debug)]
pub struct StoreError {
    kind: StoreKind,
    short_message: String,
    meta_messages: Vec<String>,
    source: Box<dyn StdError + Send + Sync>,
}

impl StoreError {
    pub fn new(
        kind: StoreKind,
        statement: impl AsRef<str>,
        parameters: &[EntityValue],
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        let source = source.into();
        let short_message = format!("{kind} error: {source}");

        let meta_messages = vec![
            format!("Statement:\n  {}", statement.as_ref()),
            format!("Parameters:\n{}", pretty_print(parameters)),
        ];

        Self {
            kind,
            short_message,
            meta_messages,
            source,
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn short_message(&self) -> &str {
        &self.short_message
    }

    pub fn meta_messages(&self) -> &[String] {
        &self.meta_messages
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.short_message, self.meta_messages.join("\n"))
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Renders the parameters as a 1-indexed map, one `key:  value` line each, keys padded
/// to the same width.
fn pretty_print(parameters: &[EntityValue]) -> String {
    let entries: Vec<(String, String)> = parameters
        .iter()
        .enumerate()
        .map(|(idx, value)| (format!("{}:", idx + 1), print_value(value)))
        .collect();

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    entries
        .into_iter()
        .map(|(key, value)| format!("  {key:<width$}  {value}"))
        .join("\n")
}

fn print_value(value: &EntityValue) -> String {
    let printed = value.to_string();

    match value {
        EntityValue::String(_) if printed.chars().count() > MAX_PRINTED_VALUE_LENGTH => {
            let truncated: String = printed.chars().take(MAX_PRINTED_VALUE_LENGTH).collect();
            format!("{truncated}...")
        }
        _ => printed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct DriverError;

    impl fmt::Display for DriverError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("no such table: t")
        }
    }

    impl StdError for DriverError {}

    #[test]
    fn wraps_statement_and_parameters() {
        let err = StoreError::new(
            StoreKind::Sqlite,
            "SELECT * FROM t WHERE id = ?",
            &[EntityValue::Int(42)],
            DriverError,
        );

        assert!(err.to_string().starts_with("SQLite error: "));
        assert_eq!(err.short_message(), "SQLite error: no such table: t");
        assert_eq!(
            err.meta_messages(),
            &[
                "Statement:\n  SELECT * FROM t WHERE id = ?".to_owned(),
                "Parameters:\n  1:  42".to_owned(),
            ]
        );
        assert_eq!(
            err.to_string(),
            "SQLite error: no such table: t\n\nStatement:\n  SELECT * FROM t WHERE id = ?\nParameters:\n  1:  42"
        );
        assert_eq!(err.source().unwrap().to_string(), "no such table: t");
    }

    #[test]
    fn pads_keys_and_truncates_long_strings() {
        let mut parameters: Vec<EntityValue> = (0..9i64).map(EntityValue::from).collect();
        parameters.push(EntityValue::from("x".repeat(100)));

        let printed = pretty_print(&parameters);
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(lines[0], "  1:   0");
        assert_eq!(lines[9], format!("  10:  {}...", "x".repeat(80)));
    }

    #[test]
    fn statements_without_parameters_render_an_empty_block() {
        let err = StoreError::new(StoreKind::Sqlite, "SELECT 1", &[], DriverError);

        assert!(err.to_string().starts_with("SQLite error: "));
        assert_eq!(err.meta_messages()[1], "Parameters:\n");
    }
}
