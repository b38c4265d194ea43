pub mod address;
pub mod authorization;
pub mod commands;
pub mod hash;
pub mod transaction;
pub mod transaction_processor;
pub mod utxo_pool;
pub mod validation;

pub use self::{
    address::*, authorization::*, hash::*, transaction::*, transaction_processor::*, utxo_pool::*,
    validation::*,
};
