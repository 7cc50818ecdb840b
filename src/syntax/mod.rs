//! Structural address check (no network access).
//!
//! The accepted grammar is a practical subset: `local@labels.tld` where the
//! local part uses alphanumerics and `. _ % + -`, domain labels use
//! alphanumerics, `.` and `-`, and the top-level label is at least two
//! letters. It is not an RFC 5322 parser.

mod types;

pub use types::EmailAddress;

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("address pattern is a valid regex")
});

/// Returns `true` when `address` has the `local@domain.tld` shape.
pub fn validate(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

/// Trims surrounding whitespace and lower-cases the input.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_basic() {
        assert!(validate("alice@example.com"));
        assert!(validate("first.last+tag@mail.example.co"));
        assert!(validate("a_b%c-d@sub-domain.example.org"));
    }

    #[test]
    fn rejects_missing_parts() {
        assert!(!validate("not-an-email"));
        assert!(!validate("@example.com"));
        assert!(!validate("alice@"));
        assert!(!validate("alice@example"));
        assert!(!validate(""));
    }

    #[test]
    fn rejects_bad_tld() {
        assert!(!validate("alice@example.c"));
        assert!(!validate("alice@example.c0m"));
        assert!(!validate("alice@example.123"));
    }

    #[test]
    fn rejects_characters_outside_subset() {
        assert!(!validate("ali ce@example.com"));
        assert!(!validate("alice!@example.com"));
        assert!(!validate("alice@exa_mple.com"));
        assert!(!validate("alice@@example.com"));
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Alice@Example.COM \n"), "alice@example.com");
    }

    proptest! {
        #[test]
        fn no_at_sign_never_validates(s in "[^@]*") {
            prop_assert!(!validate(&s));
        }

        #[test]
        fn short_or_non_alpha_tld_never_validates(
            local in "[a-z0-9]{1,12}",
            label in "[a-z0-9]{1,12}",
            tld in "([a-z]|[a-z]*[0-9][a-z0-9]*)",
        ) {
            let address = format!("{local}@{label}.{tld}");
            prop_assert!(!validate(&address));
        }

        #[test]
        fn well_formed_addresses_validate(
            local in "[a-z0-9._%+-]{1,20}",
            label in "[a-z0-9-]{1,20}",
            tld in "[a-z]{2,6}",
        ) {
            let address = format!("{local}@{label}.{tld}");
            prop_assert!(validate(&address));
        }
    }
}
