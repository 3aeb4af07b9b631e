//! Route handlers for the demo API.
//!
//! Handlers keep no state: they check that the required request fields are
//! present and answer with mock data.

pub mod auth;
pub mod health;
pub mod root;
pub mod users;

/// Returns the value only when it is present and non-empty.
///
/// Mirrors the falsy check the demo clients rely on: absent, `null` and `""`
/// all count as missing.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_filters_empty_values() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some(" ")), Some(" "));
        assert_eq!(present(Some("alice@example.com")), Some("alice@example.com"));
    }
}
