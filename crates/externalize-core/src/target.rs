//! Destination identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Destination an externalized payload is sent to, e.g. a topic or queue name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutingTarget {
    target: String,
}

impl RoutingTarget {
    /// Fails with [`Error::InvalidArgument`] for an empty target
    pub fn new(target: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(Error::invalid_argument("Routing target must not be empty"));
        }
        Ok(Self { target })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn into_inner(self) -> String {
        self.target
    }
}

impl fmt::Display for RoutingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}

impl AsRef<str> for RoutingTarget {
    fn as_ref(&self) -> &str {
        &self.target
    }
}

impl TryFrom<String> for RoutingTarget {
    type Error = Error;

    fn try_from(target: String) -> Result<Self> {
        Self::new(target)
    }
}

impl TryFrom<&str> for RoutingTarget {
    type Error = Error;

    fn try_from(target: &str) -> Result<Self> {
        Self::new(target)
    }
}

impl From<RoutingTarget> for String {
    fn from(target: RoutingTarget) -> Self {
        target.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_content() {
        let a = RoutingTarget::new("orders").unwrap();
        let b = RoutingTarget::try_from("orders".to_string()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, RoutingTarget::new("payments").unwrap());

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_target_rejected() {
        let err = RoutingTarget::new("").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_target_exposed_unchanged() {
        let target = RoutingTarget::new(" orders.placed ").unwrap();
        assert_eq!(target.target(), " orders.placed ");
        assert_eq!(target.to_string(), " orders.placed ");
    }

    #[test]
    fn test_serde_validates() {
        let target: RoutingTarget = serde_json::from_str("\"orders\"").unwrap();
        assert_eq!(target.target(), "orders");
        assert_eq!(serde_json::to_string(&target).unwrap(), "\"orders\"");
        assert!(serde_json::from_str::<RoutingTarget>("\"\"").is_err());
    }
}
