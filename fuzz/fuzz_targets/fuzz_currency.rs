#![no_main]

use arbitrary::Arbitrary;
use frontier::content::Catalog;
use frontier::game::invariants::check_invariants;
use frontier::game::{
    advance_tick, gain_currency, lose_currency, GameCurrency, MemoryStore, StateStore,
};
use libfuzzer_sys::fuzz_target;

/// One ledger operation.
#[derive(Arbitrary, Debug)]
enum LedgerOp {
    /// Credit a balance.
    Gain(u8, f64),
    /// Debit a balance.
    Lose(u8, f64),
    /// Advance one tick.
    Tick,
}

fuzz_target!(|ops: Vec<LedgerOp>| {
    let catalog = Catalog::new();
    let mut store = MemoryStore::default();
    let currency = |idx: u8| GameCurrency::ALL[usize::from(idx) % GameCurrency::ALL.len()];

    for op in ops.into_iter().take(256) {
        match op {
            LedgerOp::Gain(idx, amount) => gain_currency(&mut store, currency(idx), amount),
            LedgerOp::Lose(idx, amount) => lose_currency(&mut store, currency(idx), amount),
            LedgerOp::Tick => advance_tick(&mut store, &catalog),
        }

        for (currency, amount) in store.read().currency.currencies.iter() {
            assert!(amount >= 0.0, "{currency} went negative: {amount}");
            assert!(amount.is_finite(), "{currency} is not finite: {amount}");
        }
    }

    // Huge finite amounts may exceed the sanity bound; anything else is a bug
    let violations: Vec<_> = check_invariants(store.read())
        .into_iter()
        .filter(|v| !v.message.contains("outside"))
        .collect();
    assert!(violations.is_empty(), "Invariants violated: {:?}", violations);
});
