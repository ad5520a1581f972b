use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rask_log_adapter::{EntryFormatter, RecordConsumer, SinkAdapter};
use serde_json::{Value, json};

fn sample_records() -> Vec<Value> {
    vec![
        json!({"v": 0, "level": 30, "name": "api", "hostname": "node-1", "pid": 4242,
               "time": "2024-05-01T10:00:00.000Z", "msg": "request completed",
               "req_id": "7d1c", "status": 200, "duration_ms": 12}),
        json!({"v": 0, "level": 50, "name": "api", "hostname": "node-1", "pid": 4242,
               "time": "2024-05-01T10:00:01.000Z", "msg": "upstream failed",
               "err": {"message": "timeout", "name": "Error",
                       "stack": "Error: timeout\n    at connect (net.js:10:5)"}}),
        json!({"v": 0, "level": 40, "name": "api", "hostname": "node-1", "pid": 4242,
               "time": "2024-05-01T10:00:02.000Z", "message": "cache miss",
               "labels": {"region": "eu-west-1", "tier": "backend"}}),
    ]
}

fn benchmark_format_record(c: &mut Criterion) {
    let formatter = EntryFormatter::default();
    let records = sample_records();

    let mut group = c.benchmark_group("format_record");
    group.throughput(Throughput::Elements(1));

    for (name, record) in ["msg_only", "error_stack", "explicit_message"]
        .iter()
        .zip(&records)
    {
        group.bench_function(*name, |b| {
            b.iter_batched(
                || record.clone(),
                |record| formatter.format(std::hint::black_box(record)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn benchmark_batch_write(c: &mut Criterion) {
    let records: Vec<Value> = sample_records().into_iter().cycle().take(1000).collect();

    let mut group = c.benchmark_group("batch_write");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("accept_batch_1000", |b| {
        b.iter_batched(
            || (SinkAdapter::new(Vec::with_capacity(256 * 1024)), records.clone()),
            |(adapter, batch)| {
                std::hint::black_box(adapter.accept_batch(batch).ok());
                adapter.into_output()
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("accept_one_1000", |b| {
        b.iter_batched(
            || (SinkAdapter::new(Vec::with_capacity(256 * 1024)), records.clone()),
            |(adapter, batch)| {
                for record in batch {
                    std::hint::black_box(adapter.accept_one(record).ok());
                }
                adapter.into_output()
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benchmark_format_record, benchmark_batch_write);
criterion_main!(benches);
