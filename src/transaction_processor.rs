use crate::{
    OutputIndex, Transaction, TransactionValidator, UtxoId, UtxoPool,
};
use std::collections::HashSet;

/// Reconciles a batch of candidate transactions against a single UTXO pool.
/// The processor owns the pool for the duration of a run and is the only place the pool
/// is mutated: accepting a transaction removes its spent outputs and adds the outputs
/// it creates, atomically.
pub struct TransactionProcessor {
    utxo_pool: UtxoPool,
    validator: TransactionValidator,
}

impl TransactionProcessor {
    pub fn new(utxo_pool: UtxoPool, validator: TransactionValidator) -> Self {
        Self {
            utxo_pool,
            validator,
        }
    }

    /// Accepts a mutually consistent subset of the candidates, in acceptance order.
    ///
    /// The candidates are scanned repeatedly in their given order. A candidate that
    /// validates against the current pool state is accepted immediately and its effects
    /// are applied before the scan continues, so later candidates see the updated pool.
    /// Scanning repeats until a full pass accepts nothing, which lets chains of
    /// transactions resolve regardless of submission order: a transaction spending an
    /// output created elsewhere in the batch becomes acceptable on a later pass, once
    /// that output exists.
    ///
    /// The selection is greedy: when two candidates compete for the same output,
    /// whichever is scanned first while valid wins, and the other is rejected once the
    /// output is gone. No attempt is made to maximize the accepted value or count.
    ///
    /// Each pass accepts at least one candidate or the loop stops, so there are at most
    /// as many passes as candidates.
    pub fn commit(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        let mut accepted = Vec::new();
        let mut accepted_ids = HashSet::new();

        let mut changed = true;
        while changed {
            changed = false;
            for candidate in candidates {
                if accepted_ids.contains(candidate.id()) {
                    continue;
                }
                if self.validator.is_valid(&self.utxo_pool, candidate) {
                    self.apply(candidate);
                    accepted_ids.insert(*candidate.id());
                    accepted.push(candidate.clone());
                    changed = true;
                }
            }
        }
        accepted
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }

    /// Applies the effects of an accepted transaction to the pool: the spent outputs
    /// are removed and the created outputs become spendable under the transaction's id.
    fn apply(&mut self, transaction: &Transaction) {
        for input in transaction.inputs() {
            self.utxo_pool.remove(&UtxoId::from(input));
        }
        for (index, output) in transaction.outputs().iter().enumerate() {
            let utxo_id = UtxoId::new(*transaction.id(), OutputIndex::new(index as u32));
            self.utxo_pool.add(utxo_id, output.clone());
        }
    }
}
