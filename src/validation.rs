use crate::{AuthorizationScheme, Transaction, UtxoId, UtxoPool};
use std::collections::HashSet;

/// Responsible for deciding whether a single transaction is acceptable against a given
/// UTXO pool. It only ever reads the pool.
///
/// A transaction is valid if all of the following hold:
///   - Every input references an output that exists in the pool.
///   - Every input carries an authorization accepted by the configured scheme.
///   - No output is referenced by more than one of the transaction's inputs.
///   - No output value is negative.
///   - The total value spent is at least the total value created. Any excess is an
///     implicit fee and is not returned to anyone.
pub struct TransactionValidator {
    authorization_scheme: Box<dyn AuthorizationScheme>,
}

impl TransactionValidator {
    pub fn new(authorization_scheme: Box<dyn AuthorizationScheme>) -> Self {
        Self {
            authorization_scheme,
        }
    }

    pub fn is_valid(&self, utxo_pool: &UtxoPool, transaction: &Transaction) -> bool {
        self.validate(utxo_pool, transaction).is_ok()
    }

    /// The same predicate as `is_valid`, but reports which rule was violated.
    /// The rules short-circuit on the first violation; the order affects only the
    /// reported message, never the outcome.
    pub fn validate(&self, utxo_pool: &UtxoPool, transaction: &Transaction) -> Result<(), String> {
        Self::validate_inputs_exist(utxo_pool, transaction)?;
        self.validate_inputs_authorized(utxo_pool, transaction)?;
        Self::validate_no_internal_double_spend(transaction)?;
        Self::validate_outputs_non_negative(transaction)?;
        Self::validate_conservation_of_value(utxo_pool, transaction)
    }

    fn validate_inputs_exist(
        utxo_pool: &UtxoPool,
        transaction: &Transaction,
    ) -> Result<(), String> {
        for input in transaction.inputs() {
            let utxo_id = UtxoId::from(input);
            if !utxo_pool.contains(&utxo_id) {
                return Err(format!(
                    "Transaction: {} spends: {} which is not an unspent output.",
                    transaction.id(),
                    utxo_id
                ));
            }
        }
        Ok(())
    }

    fn validate_inputs_authorized(
        &self,
        utxo_pool: &UtxoPool,
        transaction: &Transaction,
    ) -> Result<(), String> {
        for input in transaction.inputs() {
            // The existence rule has already run, so the lookup only fails if the rules
            // are evaluated out of order.
            let output = utxo_pool
                .get(&UtxoId::from(input))
                .map_err(|e| e.to_string())?;
            let authorized = self.authorization_scheme.verify(
                output.recipient(),
                input.authorization(),
                transaction.id().as_slice(),
            );
            if !authorized {
                return Err(format!(
                    "Transaction: {} input: {} is not authorized by owner: {}",
                    transaction.id(),
                    input,
                    output.recipient()
                ));
            }
        }
        Ok(())
    }

    fn validate_no_internal_double_spend(transaction: &Transaction) -> Result<(), String> {
        let mut spent_utxos = HashSet::new();
        for input in transaction.inputs() {
            let utxo_id = UtxoId::from(input);
            if !spent_utxos.insert(utxo_id) {
                return Err(format!(
                    "Transaction: {} spends: {} more than once.",
                    transaction.id(),
                    utxo_id
                ));
            }
        }
        Ok(())
    }

    fn validate_outputs_non_negative(transaction: &Transaction) -> Result<(), String> {
        for output in transaction.outputs() {
            if output.value() < 0.0 {
                return Err(format!(
                    "Transaction: {} creates an output with negative value: {}",
                    transaction.id(),
                    output.value()
                ));
            }
        }
        Ok(())
    }

    fn validate_conservation_of_value(
        utxo_pool: &UtxoPool,
        transaction: &Transaction,
    ) -> Result<(), String> {
        let mut input_sum = 0.0;
        for input in transaction.inputs() {
            let output = utxo_pool
                .get(&UtxoId::from(input))
                .map_err(|e| e.to_string())?;
            input_sum += output.value();
        }
        let output_sum: f64 = transaction.outputs().iter().map(|o| o.value()).sum();
        if input_sum < output_sum {
            Err(format!(
                "Transaction: {} creates value: {} out of spent value: {}",
                transaction.id(),
                output_sum,
                input_sum
            ))
        } else {
            Ok(())
        }
    }
}
