/// Lower-cases the first character, `TokenBalance` -> `tokenBalance`.
pub fn camel_case<T>(s: T) -> String
where
    T: Into<String>,
{
    let s = s.into();
    let mut chars = s.chars();

    match chars.next() {
        Some(first) => format!("{}{}", first.to_lowercase(), chars.as_str()),
        None => s,
    }
}

/// Whether `name` can be used verbatim as an identifier in generated SQL and SDL.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_only_touches_the_first_character() {
        assert_eq!(camel_case("TokenBalance"), "tokenBalance");
        assert_eq!(camel_case("A"), "a");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("owner_id"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier("a-b"));
        assert!(!is_valid_identifier("a\"; DROP"));
        assert!(!is_valid_identifier(""));
    }
}
