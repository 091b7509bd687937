use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use debt_sim::engine::{compare_strategies, simulate_minimum_only, simulate_strategy};
use debt_sim::models::{Debt, PayoffConfig, StrategyConfig};
use debt_sim::strategies::build_strategy;

const DEBT_COUNTS: [usize; 3] = [4, 16, 48];

fn build_debts(count: usize) -> Vec<Debt> {
    (0..count)
        .map(|idx| {
            let balance = 500.0 + 750.0 * idx as f64;
            let monthly_rate = 0.5 + (idx % 7) as f64 * 0.4;
            let min_payment = balance * monthly_rate / 100.0 + balance / 120.0;
            Debt::new(&format!("debt-{}", idx), balance, monthly_rate, min_payment)
        })
        .collect()
}

fn budget_for(debts: &[Debt]) -> f64 {
    debts.iter().map(|debt| debt.min_payment).sum::<f64>() * 1.25
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy");

    for count in DEBT_COUNTS {
        let debts = build_debts(count);
        let budget = budget_for(&debts);

        group.bench_with_input(BenchmarkId::new("minimum-only", count), &debts, |b, debts| {
            b.iter(|| black_box(simulate_minimum_only(debts)));
        });

        for config in StrategyConfig::ALL {
            let strategy = build_strategy(config);
            group.bench_with_input(BenchmarkId::new(config.label(), count), &debts, |b, debts| {
                b.iter(|| black_box(simulate_strategy(debts, budget, strategy.as_ref())));
            });
        }
    }

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for count in DEBT_COUNTS {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let debts = build_debts(count);
                    let monthly_budget = budget_for(&debts);
                    PayoffConfig {
                        debts,
                        monthly_budget,
                        strategy: None,
                    }
                },
                |config| black_box(compare_strategies(&config)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_comparison);
criterion_main!(benches);
