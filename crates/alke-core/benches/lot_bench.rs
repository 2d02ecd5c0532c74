//! Benchmarks for fee computation and admit/discharge cycles.

use alke_core::{FeeCalculator, ManualClock, ParkingLot, Vehicle, VehicleCategory};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

fn bench_compute_fee(c: &mut Criterion) {
    c.bench_function("compute_fee_overage_discounted", |b| {
        b.iter(|| {
            FeeCalculator::compute_fee(
                black_box(VehicleCategory::MiniBus),
                black_box(487),
                black_box(true),
            )
        });
    });
}

fn bench_admit_discharge(c: &mut Criterion) {
    let plates: Vec<String> = (0..20).map(|i| format!("BENCH{i:02}")).collect();

    c.bench_function("fill_and_empty_lot_20", |b| {
        b.iter(|| {
            let clock = Arc::new(ManualClock::at_epoch());
            let mut lot = ParkingLot::with_clock(20, clock.clone());
            for plate in &plates {
                let _ = lot.admit(Vehicle::arriving(
                    plate.as_str(),
                    VehicleCategory::Car,
                    clock.as_ref(),
                ));
            }
            clock.advance_minutes(140).expect("in range");
            for plate in &plates {
                let _ = lot.discharge(plate);
            }
            black_box(lot.statistics())
        });
    });
}

criterion_group!(benches, bench_compute_fee, bench_admit_discharge);
criterion_main!(benches);
