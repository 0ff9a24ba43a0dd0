//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - User input is ALWAYS passed via `.bind()` parameters
//! - No string concatenation or interpolation with user data
//!
//! When adding new SQL here:
//! 1. Document why Diesel DSL can't be used
//! 2. Ensure all user input uses `.bind()`

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::BigInt;

/// Window function for counting total rows across the full result set.
///
/// Returns `COUNT(*) OVER()` which gives the total count before LIMIT/OFFSET.
/// Diesel doesn't support window functions natively.
///
/// # Safety
/// Static SQL string with no user input.
pub fn count_over() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER()")
}

/// Filter expression matching recipes whose id ends with a suffix.
///
/// Pass a pattern built by [`suffix_pattern`].
///
/// # Safety
/// The pattern is passed via `.bind()`, not interpolated.
///
/// # Why raw SQL?
/// The id column is a UUID and Diesel has no DSL for casting it to text.
#[macro_export]
macro_rules! id_matches_suffix {
    ($pattern:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>("recipes.id::text LIKE ")
            .bind::<diesel::sql_types::Text, _>($pattern)
    };
}

/// `LIKE` pattern matching strings that end with `suffix`.
pub fn suffix_pattern(suffix: &str) -> String {
    format!(
        "%{}",
        suffix
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

/// Case-insensitive substring pattern for `ILIKE`.
pub fn contains_pattern(text: &str) -> String {
    format!(
        "%{}%",
        text.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_pattern_escapes_wildcards() {
        assert_eq!(suffix_pattern("1f0a9b8c"), "%1f0a9b8c");
        assert_eq!(suffix_pattern("a_b%"), "%a\\_b\\%");
    }

    #[test]
    fn test_contains_pattern() {
        assert_eq!(contains_pattern("chili"), "%chili%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
    }
}
