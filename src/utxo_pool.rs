use crate::{OutputIndex, TransactionId, TransactionInput, TransactionOutput};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifies a spendable coin by the transaction that created it and the position of
/// the output within that transaction. Two identifiers denote the same coin if and only
/// if both fields match.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub struct UtxoId {
    source_tx_id: TransactionId,
    output_index: OutputIndex,
}

impl UtxoId {
    pub fn new(source_tx_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            source_tx_id,
            output_index,
        }
    }

    pub fn source_tx_id(&self) -> &TransactionId {
        &self.source_tx_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }
}

impl From<&TransactionInput> for UtxoId {
    fn from(input: &TransactionInput) -> Self {
        Self::new(*input.source_tx_id(), *input.output_index())
    }
}

impl Display for UtxoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source_tx_id, self.output_index)
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum UtxoPoolError {
    NotFound(UtxoId),
}

impl Display for UtxoPoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UtxoPoolError::NotFound(utxo_id) => {
                write!(f, "No unspent output found for: {}", utxo_id)
            }
        }
    }
}

impl Error for UtxoPoolError {}

/// A pool of confirmed and unspent transaction outputs, indexed by the transaction that
/// created them and their position within it.
/// Every entry denotes a coin that has been created and not yet spent.
#[derive(Debug, Clone, Default)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Inserts the mapping, overwriting any previous output stored under the same id.
    pub fn add(&mut self, utxo_id: UtxoId, output: TransactionOutput) {
        self.utxos.insert(utxo_id, output);
    }

    /// Deletes the mapping if present. Removing an absent id is not an error.
    pub fn remove(&mut self, utxo_id: &UtxoId) {
        self.utxos.remove(utxo_id);
    }

    pub fn contains(&self, utxo_id: &UtxoId) -> bool {
        self.utxos.contains_key(utxo_id)
    }

    pub fn get(&self, utxo_id: &UtxoId) -> Result<&TransactionOutput, UtxoPoolError> {
        self.utxos
            .get(utxo_id)
            .ok_or(UtxoPoolError::NotFound(*utxo_id))
    }

    /// Returns a copy of all unspent output ids in no particular order.
    pub fn utxo_ids(&self) -> Vec<UtxoId> {
        self.utxos.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, Sha256};

    fn utxo_id(tag: &[u8], index: u32) -> UtxoId {
        UtxoId::new(
            TransactionId::new(Sha256::digest(tag)),
            OutputIndex::new(index),
        )
    }

    #[test]
    fn add_then_get_returns_the_output() {
        let mut pool = UtxoPool::new();
        let id = utxo_id(b"genesis", 0);
        pool.add(id, TransactionOutput::new(100.0, Address::new("Alice")));

        assert!(pool.contains(&id));
        let output = pool.get(&id).unwrap();
        assert_eq!(output.value(), 100.0);
        assert_eq!(output.recipient(), &Address::new("Alice"));
    }

    #[test]
    fn add_overwrites_existing_entry() {
        let mut pool = UtxoPool::new();
        let id = utxo_id(b"genesis", 0);
        pool.add(id, TransactionOutput::new(100.0, Address::new("Alice")));
        pool.add(id, TransactionOutput::new(50.0, Address::new("Bob")));

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&id).unwrap().value(), 50.0);
    }

    #[test]
    fn get_absent_id_fails_with_not_found() {
        let pool = UtxoPool::new();
        let id = utxo_id(b"genesis", 0);
        assert_eq!(pool.get(&id), Err(UtxoPoolError::NotFound(id)));
    }

    #[test]
    fn remove_absent_id_is_not_an_error() {
        let mut pool = UtxoPool::new();
        pool.remove(&utxo_id(b"genesis", 0));
        assert!(pool.is_empty());
    }

    #[test]
    fn ids_differing_only_in_index_are_distinct_coins() {
        let mut pool = UtxoPool::new();
        pool.add(
            utxo_id(b"genesis", 0),
            TransactionOutput::new(100.0, Address::new("Alice")),
        );
        pool.add(
            utxo_id(b"genesis", 1),
            TransactionOutput::new(50.0, Address::new("Bob")),
        );

        assert_eq!(pool.len(), 2);
        pool.remove(&utxo_id(b"genesis", 0));
        assert!(!pool.contains(&utxo_id(b"genesis", 0)));
        assert!(pool.contains(&utxo_id(b"genesis", 1)));
    }
}
