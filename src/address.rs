use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An opaque token identifying the party that is allowed to spend a transaction output.
/// In a real system this would be derived from the owner's public key.
#[derive(Debug, Clone, Hash, Serialize, Deserialize, Eq, PartialEq)]
pub struct Address(String);

impl Address {
    pub fn new<S: Into<String>>(address: S) -> Self {
        Self(address.into())
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
