use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_settlement::settlement::calculator::SettlementCalculator;
use expense_settlement::simulation::random_group::{
    generate_random_expenses, member_names, RandomGroupConfig,
};

fn bench_group(c: &mut Criterion, label: &str, member_count: usize, expense_count: usize) {
    let config = RandomGroupConfig {
        member_count,
        expense_count,
        ..Default::default()
    };
    let members = member_names(member_count);
    let expenses = generate_random_expenses(&members, &config, 0.0);
    let calculator = SettlementCalculator::default();

    c.bench_function(label, |b| {
        b.iter(|| calculator.compute_settlements(black_box(&members), black_box(&expenses)))
    });
}

fn bench_settle_10_members(c: &mut Criterion) {
    bench_group(c, "settle_10_members", 10, 50);
}

fn bench_settle_100_members(c: &mut Criterion) {
    bench_group(c, "settle_100_members", 100, 1_000);
}

fn bench_settle_1000_members(c: &mut Criterion) {
    bench_group(c, "settle_1000_members", 1_000, 10_000);
}

criterion_group!(
    benches,
    bench_settle_10_members,
    bench_settle_100_members,
    bench_settle_1000_members
);
criterion_main!(benches);
