use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use skyseat_core::{PassengerStore, StoreKind};
use skyseat_shared::{PassengerRecord, SeatColumn, SeatPosition, TravelClass};
use skyseat_store::app_config::StoreConfig;
use skyseat_store::StoreBackend;

// Economy rows only, so every generated seat passes the zone check.
fn economy_records(count: usize) -> Vec<PassengerRecord> {
    let mut rng = thread_rng();
    let mut records: Vec<PassengerRecord> = (0..count)
        .map(|i| {
            let row = 11 + (i / 6) as u32;
            let column = SeatColumn::ALL[i % 6];
            let seat = SeatPosition::new(row, column).unwrap();
            let name = format!("Passenger {:05}", rng.gen_range(0..100_000));
            PassengerRecord::new(format!("P{:06}", i), name, seat, TravelClass::Economy)
        })
        .collect();
    records.shuffle(&mut rng);
    records
}

fn filled(kind: StoreKind, records: &[PassengerRecord]) -> StoreBackend {
    let mut store = StoreBackend::new(kind, &StoreConfig::default());
    for record in records {
        store.reserve(record.clone()).unwrap();
    }
    store
}

pub fn reserve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reserve");

    for size in [100, 500, 2000].iter() {
        let records = economy_records(*size);
        for kind in StoreKind::ALL {
            let id = BenchmarkId::new(kind.to_string(), size);
            group.bench_with_input(id, &records, |b, records| {
                b.iter(|| black_box(filled(kind, records)))
            });
        }
    }

    group.finish();
}

pub fn lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let records = economy_records(1000);

    for kind in StoreKind::ALL {
        let store = filled(kind, &records);
        let mut rng = thread_rng();

        group.bench_function(BenchmarkId::new("find", kind.to_string()), |b| {
            b.iter(|| {
                let record = records.choose(&mut rng).unwrap();
                black_box(store.find(&record.id))
            })
        });

        // Full seat map scan: one occupancy check per cell.
        group.bench_function(BenchmarkId::new("seat_map_scan", kind.to_string()), |b| {
            b.iter(|| {
                let last_row = store.last_occupied_row();
                let mut occupied = 0usize;
                for row in 1..=last_row {
                    for column in SeatColumn::ALL {
                        let seat = SeatPosition::new(row, column).unwrap();
                        if store.is_occupied(seat) {
                            occupied += 1;
                        }
                    }
                }
                black_box(occupied)
            })
        });
    }

    group.finish();
}

pub fn sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let records = economy_records(500);

    for kind in StoreKind::ALL {
        group.bench_function(BenchmarkId::new("bubble_by_name", kind.to_string()), |b| {
            b.iter_batched(
                || filled(kind, &records),
                |mut store| black_box(store.sort_by_name()),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("merge_by_id", kind.to_string()), |b| {
            b.iter_batched(
                || filled(kind, &records),
                |mut store| black_box(store.sort_by_id()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, reserve_benchmark, lookup_benchmark, sort_benchmark);
criterion_main!(benches);
