use crate::{
    Address, AlwaysValid, OutputIndex, Transaction, TransactionBuilder, TransactionId,
    TransactionProcessor, TransactionValidator, UtxoId, UtxoPool,
};
use clap::{App, ArgMatches};
use std::error::Error;

pub fn simulate_command() -> App<'static> {
    App::new("simulate")
        .version("0.1")
        .about("Runs a small ScroogeCoin scenario against a genesis ledger and prints the result.")
}

pub fn run_simulate_command(_matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    // The genesis transaction creates the initial coins out of nothing, so it is not
    // validated; its outputs seed the pool directly.
    let mut genesis = TransactionBuilder::new();
    genesis.add_output(100.0, Address::new("Alice"));
    genesis.add_output(50.0, Address::new("Bob"));
    let genesis = genesis.finalize()?;

    let mut utxo_pool = UtxoPool::new();
    for (index, output) in genesis.outputs().iter().enumerate() {
        utxo_pool.add(
            UtxoId::new(*genesis.id(), OutputIndex::new(index as u32)),
            output.clone(),
        );
    }
    println!("Genesis transaction: {}", genesis.id());

    // Alice pays Charlie 20 and sends the remaining 80 back to herself as change.
    let mut payment = TransactionBuilder::new();
    payment.add_input(*genesis.id(), OutputIndex::new(0));
    payment.add_output(20.0, Address::new("Charlie"));
    payment.add_output(80.0, Address::new("Alice"));
    let payment = payment.finalize()?;

    // David is paid with a coin that was never created.
    let mut bogus = TransactionBuilder::new();
    bogus.add_input(
        TransactionId::new(crate::Sha256::digest(b"fake_hash")),
        OutputIndex::new(0),
    );
    bogus.add_output(10.0, Address::new("David"));
    let bogus = bogus.finalize()?;

    let candidates = vec![payment, bogus];
    println!("Processing {} candidate transactions...", candidates.len());

    let validator = TransactionValidator::new(Box::new(AlwaysValid {}));
    let mut processor = TransactionProcessor::new(utxo_pool, validator);
    let accepted = processor.commit(&candidates);

    print_results(&accepted, processor.utxo_pool());
    Ok(())
}

fn print_results(accepted: &[Transaction], utxo_pool: &UtxoPool) {
    if accepted.is_empty() {
        println!("No transactions were accepted.");
    } else {
        println!("Accepted transactions:");
        for transaction in accepted {
            println!("  {}", transaction.id());
        }
    }
    println!("Unspent outputs after the run:");
    for utxo_id in utxo_pool.utxo_ids() {
        // The id was just listed by the pool, so the lookup cannot fail.
        if let Ok(output) = utxo_pool.get(&utxo_id) {
            println!("  {} -> {}", utxo_id, output);
        }
    }
}
