use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use market_core::{ClassId, RngSource, SimConfig};
use session::MarketSession;

const BENCH_TICKS: u64 = 10_000;

fn bench_session_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_clock");
    group.throughput(Throughput::Elements(BENCH_TICKS));

    group.bench_function(BenchmarkId::new("tick", BENCH_TICKS), |b| {
        b.iter(|| {
            let mut session = MarketSession::new(ClassId::NineA, SimConfig::default());
            let mut rng = RngSource::seeded(7);
            for index in 0..5 {
                let _ = session.invest(index, 300.0);
            }
            for _ in 0..BENCH_TICKS {
                black_box(session.tick(&mut rng));
            }
            black_box(session.balance());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_session_clock);
criterion_main!(benches);
