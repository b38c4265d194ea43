use crate::Address;
use serde::{Deserialize, Serialize};

/// An opaque witness that a transaction input presents to prove it is allowed to spend
/// the referenced output. In a real system this would hold a cryptographic signature.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Authorization(Vec<u8>);

impl Authorization {
    pub fn new(witness: Vec<u8>) -> Self {
        Self(witness)
    }

    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Decides whether an authorization witness proves that the claimant controls the owner
/// address of the output being spent.
/// The validator depends on this seam so that a real signature scheme can be plugged in
/// without changing any of the structural validation rules.
pub trait AuthorizationScheme {
    fn verify(&self, owner: &Address, authorization: &Authorization, message: &[u8]) -> bool;
}

/// The scheme this core ships with: every authorization is accepted.
pub struct AlwaysValid {}

impl AuthorizationScheme for AlwaysValid {
    fn verify(&self, _owner: &Address, _authorization: &Authorization, _message: &[u8]) -> bool {
        true
    }
}
