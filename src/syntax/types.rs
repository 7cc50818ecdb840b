use std::fmt;

use super::{normalize, validate};

/// A normalized address that passed [`validate`](super::validate).
///
/// Both the local part and the domain are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
    at: usize,
}

impl EmailAddress {
    /// Normalizes `input` (trim + lower-case) and validates it.
    pub fn parse(input: &str) -> Option<Self> {
        let address = normalize(input);
        if !validate(&address) {
            return None;
        }
        let at = address.rfind('@')?;
        Some(Self { address, at })
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn local(&self) -> &str {
        &self.address[..self.at]
    }

    pub fn domain(&self) -> &str {
        &self.address[self.at + 1..]
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_and_splits() {
        let addr = EmailAddress::parse("  Bob.Smith@Example.ORG ").expect("valid address");
        assert_eq!(addr.as_str(), "bob.smith@example.org");
        assert_eq!(addr.local(), "bob.smith");
        assert_eq!(addr.domain(), "example.org");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(EmailAddress::parse("not-an-email").is_none());
        assert!(EmailAddress::parse("   ").is_none());
    }
}
