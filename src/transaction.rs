use crate::{Address, Authorization, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0.as_slice()
    }
}

/// The index of the transaction output, the first one is 0.
#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(u32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// A claim to spend a previously created transaction output.
/// It does not carry a value; the value is resolved by looking the referenced output up
/// in the UTXO pool.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    // A pointer to the transaction containing the output to be spent.
    source_tx_id: TransactionId,
    // The position of the output within that transaction.
    output_index: OutputIndex,
    // The witness proving that the claimant controls the referenced output.
    authorization: Authorization,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source_tx_id, self.output_index)
    }
}

impl TransactionInput {
    pub fn new(source_tx_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            source_tx_id,
            output_index,
            authorization: Authorization::empty(),
        }
    }

    pub fn with_authorization(
        source_tx_id: TransactionId,
        output_index: OutputIndex,
        authorization: Authorization,
    ) -> Self {
        Self {
            source_tx_id,
            output_index,
            authorization,
        }
    }

    pub fn source_tx_id(&self) -> &TransactionId {
        &self.source_tx_id
    }

    pub fn output_index(&self) -> &OutputIndex {
        &self.output_index
    }

    pub fn authorization(&self) -> &Authorization {
        &self.authorization
    }
}

/// A newly created coin: a value assigned to a recipient address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutput {
    value: f64,
    recipient: Address,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.value, self.recipient)
    }
}

impl TransactionOutput {
    pub fn new(value: f64, recipient: Address) -> Self {
        Self { value, recipient }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }
}

/// A finalized transfer of value: inputs spending existing coins and outputs creating
/// new ones. The identifier is derived from the full transaction content at finalize
/// time and the transaction is immutable afterwards.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl Transaction {
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Accumulates inputs and outputs for a transaction under construction.
/// `finalize` seals the content and derives the identifier, after which no mutation is
/// possible because only the immutable `Transaction` remains.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            inputs: vec![],
            outputs: vec![],
        }
    }

    pub fn add_input(&mut self, source_tx_id: TransactionId, output_index: OutputIndex) -> &mut Self {
        self.inputs
            .push(TransactionInput::new(source_tx_id, output_index));
        self
    }

    pub fn add_authorized_input(&mut self, input: TransactionInput) -> &mut Self {
        self.inputs.push(input);
        self
    }

    pub fn add_output(&mut self, value: f64, recipient: Address) -> &mut Self {
        self.outputs.push(TransactionOutput::new(value, recipient));
        self
    }

    /// Derives the transaction identifier from the full content and returns the sealed
    /// transaction. The identifier is the double SHA-256 of the canonical serialization
    /// of all inputs and outputs in order, so identical content always produces the
    /// same identifier and distinct content produces distinct identifiers up to hash
    /// collisions.
    pub fn finalize(self) -> Result<Transaction, String> {
        let id = Self::hash_transaction_data(&self.inputs, &self.outputs)?;
        Ok(Transaction {
            id,
            inputs: self.inputs,
            outputs: self.outputs,
        })
    }

    fn hash_transaction_data(
        inputs: &Vec<TransactionInput>,
        outputs: &Vec<TransactionOutput>,
    ) -> Result<TransactionId, String> {
        let data = bincode::serialize(&(inputs, outputs)).map_err(|e| e.to_string())?;
        Ok(TransactionId::new(Sha256::double_digest(&data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genesis_id() -> TransactionId {
        TransactionId::new(Sha256::digest(b"genesis"))
    }

    #[test]
    fn identical_content_produces_identical_id() {
        let mut first = TransactionBuilder::new();
        first.add_input(genesis_id(), OutputIndex::new(0));
        first.add_output(20.0, Address::new("Charlie"));

        let mut second = TransactionBuilder::new();
        second.add_input(genesis_id(), OutputIndex::new(0));
        second.add_output(20.0, Address::new("Charlie"));

        let first = first.finalize().unwrap();
        let second = second.finalize().unwrap();
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn different_content_produces_different_id() {
        let mut first = TransactionBuilder::new();
        first.add_input(genesis_id(), OutputIndex::new(0));
        first.add_output(20.0, Address::new("Charlie"));

        let mut second = TransactionBuilder::new();
        second.add_input(genesis_id(), OutputIndex::new(0));
        second.add_output(21.0, Address::new("Charlie"));

        let first = first.finalize().unwrap();
        let second = second.finalize().unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn output_order_affects_id() {
        let mut first = TransactionBuilder::new();
        first.add_output(20.0, Address::new("Charlie"));
        first.add_output(80.0, Address::new("Alice"));

        let mut second = TransactionBuilder::new();
        second.add_output(80.0, Address::new("Alice"));
        second.add_output(20.0, Address::new("Charlie"));

        let first = first.finalize().unwrap();
        let second = second.finalize().unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn finalized_transaction_preserves_content_in_order() {
        let mut builder = TransactionBuilder::new();
        builder.add_input(genesis_id(), OutputIndex::new(1));
        builder.add_output(20.0, Address::new("Charlie"));
        builder.add_output(80.0, Address::new("Alice"));
        let transaction = builder.finalize().unwrap();

        assert_eq!(transaction.inputs().len(), 1);
        assert_eq!(
            transaction.inputs()[0],
            TransactionInput::new(genesis_id(), OutputIndex::new(1))
        );
        assert_eq!(transaction.outputs().len(), 2);
        assert_eq!(transaction.outputs()[0].value(), 20.0);
        assert_eq!(transaction.outputs()[1].recipient(), &Address::new("Alice"));
    }
}
