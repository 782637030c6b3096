//! # Durable Nonce Game Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-crypto | Sign and verify a transaction |
//! | dng-runtime | Process a transfer, process a game move |
//! | durable-nonce-game | Winner detection |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dng_runtime::domain::BankConfig;
use dng_runtime::{system_program, Bank};
use durable_nonce_game::{check_winner, instruction, Board, DurableNonceGame};
use shared_crypto::{sign_transaction, verify_transaction, Keypair, Signer};
use shared_types::{Pubkey, Transaction, LAMPORTS_PER_SOL};

// ============================================================================
// SIGNATURES
// ============================================================================

fn bench_sign_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("signatures");
    group.measurement_time(Duration::from_secs(5));

    for signers in [1usize, 2, 4] {
        let keys: Vec<Keypair> = (0..signers).map(|_| Keypair::new()).collect();
        let payer = keys[0].pubkey();
        let ixs: Vec<_> = keys
            .iter()
            .map(|k| system_program::transfer(&k.pubkey(), &Pubkey::new_unique(), 1))
            .collect();
        let refs: Vec<&dyn Signer> = keys.iter().map(|k| k as &dyn Signer).collect();

        group.throughput(Throughput::Elements(signers as u64));
        group.bench_with_input(BenchmarkId::new("sign", signers), &ixs, |b, ixs| {
            b.iter(|| {
                let mut tx = Transaction::new_with_payer(ixs, Some(&payer));
                sign_transaction(&mut tx, &refs, Default::default()).unwrap();
                black_box(tx)
            })
        });

        let mut tx = Transaction::new_with_payer(&ixs, Some(&payer));
        sign_transaction(&mut tx, &refs, Default::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("verify", signers), &tx, |b, tx| {
            b.iter(|| black_box(verify_transaction(tx).is_ok()))
        });
    }

    group.finish();
}

// ============================================================================
// BANK
// ============================================================================

fn bench_transfer(c: &mut Criterion) {
    let mut bank = Bank::new(BankConfig::default());
    let payer = Keypair::new();
    bank.airdrop(&payer.pubkey(), 1_000 * LAMPORTS_PER_SOL).unwrap();
    let to = Pubkey::new_unique();

    c.bench_function("bank_transfer", |b| {
        b.iter(|| {
            bank.advance_slot();
            let ix = system_program::transfer(&payer.pubkey(), &to, LAMPORTS_PER_SOL / 1_000);
            let mut tx = Transaction::new_with_payer(&[ix], Some(&payer.pubkey()));
            sign_transaction(&mut tx, &[&payer], bank.latest_blockhash()).unwrap();
            black_box(bank.process_transaction(&tx))
        })
    });
}

fn bench_initialize(c: &mut Criterion) {
    let mut bank = Bank::new(BankConfig::default());
    bank.add_builtin(Arc::new(DurableNonceGame));
    let payer = Keypair::new();
    bank.airdrop(&payer.pubkey(), 1_000 * LAMPORTS_PER_SOL).unwrap();

    c.bench_function("game_initialize", |b| {
        b.iter(|| {
            bank.advance_slot();
            let mut tx =
                Transaction::new_with_payer(&[instruction::initialize()], Some(&payer.pubkey()));
            sign_transaction(&mut tx, &[&payer], bank.latest_blockhash()).unwrap();
            black_box(bank.process_transaction(&tx))
        })
    });
}

// ============================================================================
// GAME RULES
// ============================================================================

fn bench_check_winner(c: &mut Criterion) {
    let boards: [(&str, Board); 3] = [
        ("open", [1, 2, 0, 0, 2, 0, 0, 1, 0]),
        ("won", [1, 2, 0, 1, 2, 2, 1, 0, 0]),
        ("draw", [1, 2, 1, 1, 2, 2, 2, 1, 2]),
    ];

    let mut group = c.benchmark_group("check_winner");
    for (name, board) in boards {
        group.bench_with_input(BenchmarkId::from_parameter(name), &board, |b, board| {
            b.iter(|| black_box(check_winner(board)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sign_and_verify,
    bench_transfer,
    bench_initialize,
    bench_check_winner
);
criterion_main!(benches);
