//! Benchmarks for notification fan-out and settlement.

use bourse_exchange::{Company, Exchange, Member};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;
use std::sync::Arc;

fn benchmark_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify");

    for subscribers in [1, 10, 100, 1000].iter() {
        let exchange = Arc::new(Exchange::new());
        let company = Company::new(&exchange, "BENCH", u64::MAX, dec!(100)).unwrap();
        for _ in 0..*subscribers {
            exchange.subscribe_fn("BENCH", |company| {
                black_box(company.current_price());
                Ok(())
            })
            .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("closures", subscribers),
            &company,
            |b, company| b.iter(|| exchange.notify(black_box(company)).unwrap()),
        );
    }

    group.finish();
}

fn benchmark_members(c: &mut Criterion) {
    let mut group = c.benchmark_group("members");

    for members in [1, 10, 100].iter() {
        let exchange = Arc::new(Exchange::new());
        let company = Company::new(&exchange, "BENCH", u64::MAX, dec!(100)).unwrap();
        let watchers: Vec<_> = (0..*members)
            .map(|_| Member::new(&exchange, dec!(1000000000), &[company.clone()], 1).unwrap())
            .collect();

        // Steady rise: every member evaluates its rule, nobody trades.
        let mut price = dec!(100);
        group.bench_with_input(BenchmarkId::new("rule_only", members), &company, |b, company| {
            b.iter(|| {
                price += dec!(0.01);
                company.update_price(black_box(price)).unwrap()
            })
        });

        black_box(&watchers);
    }

    group.finish();
}

criterion_group!(benches, benchmark_fanout, benchmark_members);
criterion_main!(benches);
