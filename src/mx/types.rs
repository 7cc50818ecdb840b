use serde::{Deserialize, Serialize};

/// A mail exchange announced for a domain.
///
/// `exchange` is stored without the trailing root-label dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxTarget {
    pub preference: u16,
    pub exchange: String,
}

impl MxTarget {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}
