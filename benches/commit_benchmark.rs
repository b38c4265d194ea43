use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use scroogecoin_lib::{
    Address, AlwaysValid, OutputIndex, Transaction, TransactionBuilder, TransactionProcessor,
    TransactionValidator, UtxoId, UtxoPool,
};

const CHAIN_LENGTH: usize = 64;

/// Builds a pool seeded with a single genesis coin and a chain of transactions where
/// each one spends the output of the previous one. The chain is returned in reverse
/// order, so the processor needs one extra pass per link to resolve it.
fn chained_batch(length: usize) -> (UtxoPool, Vec<Transaction>) {
    let mut genesis = TransactionBuilder::new();
    genesis.add_output(1000.0, Address::new("Alice"));
    let genesis = genesis.finalize().unwrap();

    let mut utxo_pool = UtxoPool::new();
    utxo_pool.add(
        UtxoId::new(*genesis.id(), OutputIndex::new(0)),
        genesis.outputs()[0].clone(),
    );

    let mut candidates = Vec::with_capacity(length);
    let mut previous_id = *genesis.id();
    for _ in 0..length {
        let mut builder = TransactionBuilder::new();
        builder.add_input(previous_id, OutputIndex::new(0));
        builder.add_output(1000.0, Address::new("Alice"));
        let transaction = builder.finalize().unwrap();
        previous_id = *transaction.id();
        candidates.push(transaction);
    }
    candidates.reverse();
    (utxo_pool, candidates)
}

fn commit_benchmark(c: &mut Criterion) {
    let (utxo_pool, candidates) = chained_batch(CHAIN_LENGTH);
    c.bench_function("commit_chained_batch_in_reverse_order", |b| {
        b.iter_batched(
            || {
                TransactionProcessor::new(
                    utxo_pool.clone(),
                    TransactionValidator::new(Box::new(AlwaysValid {})),
                )
            },
            |mut processor| black_box(processor.commit(&candidates)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, commit_benchmark);
criterion_main!(benches);
