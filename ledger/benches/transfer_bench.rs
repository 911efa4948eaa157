// Hot-path benchmarks for the token ledger.
//
// Covers the direct transfer pipeline (pause + whitelist + checked
// arithmetic), delegated transfers, minting, and the balance query.

use criterion::{criterion_group, criterion_main, Criterion};

use fluwix_ledger::config::GenesisConfig;
use fluwix_ledger::identity::{Address, ADDRESS_LEN};
use fluwix_ledger::ledger::Ledger;

fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; ADDRESS_LEN])
}

fn funded_ledger() -> Ledger {
    let operator = addr(0x01);
    let mut lg = Ledger::genesis(
        operator,
        GenesisConfig {
            token_name: "FluwixToken".into(),
            token_symbol: "FWX".into(),
            decimals: 18,
            initial_account: operator,
            initial_supply: u128::MAX / 2,
        },
    );
    lg.add_whitelist(operator, addr(0x02)).unwrap();
    lg
}

fn bench_transfer(c: &mut Criterion) {
    let mut lg = funded_ledger();
    c.bench_function("ledger/transfer", |b| {
        b.iter(|| lg.transfer(addr(0x01), addr(0x02), 1).unwrap());
    });
}

fn bench_transfer_from(c: &mut Criterion) {
    let mut lg = funded_ledger();
    lg.approve(addr(0x01), addr(0x03), u128::MAX).unwrap();
    c.bench_function("ledger/transfer_from", |b| {
        b.iter(|| {
            lg.transfer_from(addr(0x03), addr(0x01), addr(0x02), 1)
                .unwrap()
        });
    });
}

fn bench_mint(c: &mut Criterion) {
    let operator = addr(0x01);
    let mut lg = Ledger::genesis(
        operator,
        GenesisConfig {
            token_name: "FluwixToken".into(),
            token_symbol: "FWX".into(),
            decimals: 18,
            initial_account: operator,
            initial_supply: 0,
        },
    );
    c.bench_function("ledger/mint", |b| {
        b.iter(|| lg.mint(operator, addr(0x02), 1).unwrap());
    });
}

fn bench_balance_query(c: &mut Criterion) {
    let lg = funded_ledger();
    c.bench_function("ledger/balance_of", |b| {
        b.iter(|| lg.balance_of(addr(0x01)));
    });
}

criterion_group!(
    benches,
    bench_transfer,
    bench_transfer_from,
    bench_mint,
    bench_balance_query
);
criterion_main!(benches);
