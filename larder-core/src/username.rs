//! Username allocation for new profiles.

use std::collections::HashSet;

/// Numbered candidates tried after the bare base name.
pub const MAX_NUMBERED_CANDIDATES: u32 = 100;

/// Base username derived from an email address: its local part, or `"user"`.
pub fn base_username(email: Option<&str>) -> String {
    email
        .and_then(|e| e.split('@').next())
        .map(str::trim)
        .filter(|local| !local.is_empty())
        .unwrap_or("user")
        .to_string()
}

/// Usernames to try in order: `base`, `base1` .. `base100`.
pub fn username_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((1..=MAX_NUMBERED_CANDIDATES).map(move |n| format!("{}{}", base, n)))
}

/// Last-resort username once every numbered candidate is taken.
pub fn fallback_username(base: &str, unix_millis: i64) -> String {
    format!("{}_{}", base, unix_millis)
}

/// First candidate for `base` not already in `taken`, or the timestamped fallback.
pub fn allocate_username(base: &str, taken: &HashSet<String>, unix_millis: i64) -> String {
    username_candidates(base)
        .find(|c| !taken.contains(c))
        .unwrap_or_else(|| fallback_username(base, unix_millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_email() {
        assert_eq!(base_username(Some("jo.cook@example.com")), "jo.cook");
        assert_eq!(base_username(Some("@example.com")), "user");
        assert_eq!(base_username(None), "user");
    }

    #[test]
    fn test_candidates_order() {
        let candidates: Vec<String> = username_candidates("jo").collect();
        assert_eq!(candidates.len(), 101);
        assert_eq!(candidates[0], "jo");
        assert_eq!(candidates[1], "jo1");
        assert_eq!(candidates[100], "jo100");
    }

    #[test]
    fn test_allocate_skips_taken() {
        let taken: HashSet<String> = ["jo", "jo1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(allocate_username("jo", &taken, 0), "jo2");
        assert_eq!(allocate_username("sam", &taken, 0), "sam");
    }

    #[test]
    fn test_allocate_falls_back_when_exhausted() {
        let taken: HashSet<String> = username_candidates("jo").collect();
        assert_eq!(allocate_username("jo", &taken, 42), "jo_42");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(fallback_username("jo", 1700000000000), "jo_1700000000000");
    }
}
