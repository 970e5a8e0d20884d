//! Normalization for whitespace-separated HTML attribute values.
//!
//! Attributes like `class` and `rel` carry zero or more tokens. An absent
//! attribute normalizes to no tokens, so membership tests never fail on a
//! missing value.

/// Split an attribute value into its whitespace-separated tokens.
pub fn attr_tokens(value: Option<&str>) -> Vec<&str> {
    value
        .map(|v| v.split_whitespace().collect())
        .unwrap_or_default()
}

/// True when the attribute holds `token` exactly, ignoring ASCII case.
pub fn attr_has_token(value: Option<&str>, token: &str) -> bool {
    attr_tokens(value)
        .iter()
        .any(|t| t.eq_ignore_ascii_case(token))
}

/// True when any token of the attribute contains `needle`, ignoring case.
pub fn attr_has_token_containing(value: Option<&str>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    attr_tokens(value)
        .iter()
        .any(|t| t.to_lowercase().contains(&needle))
}
