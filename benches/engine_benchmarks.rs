//! Performance benchmarks for the HR engine.
//!
//! This benchmark suite covers the hot paths of a yearly HR cycle:
//! - Compensating a full year of public holidays
//! - Initializing balances for a company
//! - Year-end rollover for a company
//! - Offer totals
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use hr_engine::calculation::{compensate_holidays, compute_offer_totals};
use hr_engine::config::ConfigLoader;
use hr_engine::ledger::{InMemoryLeaveStore, LeaveLedger, process_rollover};
use hr_engine::models::{CompensationInputs, HolidayInput};

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn staff(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("emp_{:05}", i)).collect()
}

/// A year of holidays including two multi-day runs.
fn year_of_holidays() -> Vec<HolidayInput> {
    let mut holidays = Vec::new();
    let eid_fitr = NaiveDate::from_ymd_opt(2026, 3, 19).expect("valid date");
    for day in 0..4 {
        holidays.push(HolidayInput::new(
            format!("Eid al-Fitr Day {}", day + 1),
            eid_fitr + Duration::days(day),
        ));
    }
    let eid_adha = NaiveDate::from_ymd_opt(2026, 5, 26).expect("valid date");
    for day in 0..4 {
        holidays.push(HolidayInput::new(
            format!("Eid al-Adha Day {}", day + 1),
            eid_adha + Duration::days(day),
        ));
    }
    holidays.push(HolidayInput::new(
        "Founding Day",
        NaiveDate::from_ymd_opt(2026, 2, 22).expect("valid date"),
    ));
    holidays.push(HolidayInput::new(
        "National Day",
        NaiveDate::from_ymd_opt(2026, 9, 23).expect("valid date"),
    ));
    holidays
}

fn bench_holiday_compensation(c: &mut Criterion) {
    let config = load_config();
    let holidays = year_of_holidays();
    let existing = BTreeSet::new();

    c.bench_function("compensate_year_of_holidays", |b| {
        b.iter(|| {
            compensate_holidays(
                black_box(&holidays),
                &existing,
                config.weekend(),
                config.holiday_shift_limit(),
            )
            .expect("compensation succeeds")
        })
    });
}

fn bench_initialize(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("initialize_balances");

    for size in [100usize, 1000] {
        let employees = staff(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &employees, |b, employees| {
            b.iter(|| {
                let mut ledger = LeaveLedger::new(InMemoryLeaveStore::new());
                ledger
                    .initialize(black_box(employees), 2026, config.leave_types())
                    .expect("initialize succeeds")
            })
        });
    }

    group.finish();
}

fn bench_rollover(c: &mut Criterion) {
    let config = load_config();
    let employees = staff(1000);
    let mut seeded = LeaveLedger::new(InMemoryLeaveStore::new());
    seeded
        .initialize(&employees, 2025, config.leave_types())
        .expect("initialize succeeds");
    let store = seeded.into_store();

    let mut group = c.benchmark_group("year_end_rollover");
    group.throughput(Throughput::Elements(employees.len() as u64));
    group.bench_function("rollover_1000", |b| {
        b.iter(|| {
            let mut ledger = LeaveLedger::new(store.clone());
            process_rollover(
                &mut ledger,
                2025,
                black_box(&employees),
                config.leave_types(),
                Some("bench"),
            )
            .expect("rollover succeeds")
        })
    });
    group.finish();
}

fn bench_offer_totals(c: &mut Criterion) {
    let config = load_config();
    let policy = config.contribution_policy();
    let inputs = CompensationInputs {
        basic_salary: Decimal::new(5000, 0),
        housing_allowance: Decimal::new(800, 0),
        transport_allowance: Decimal::new(400, 0),
        other_allowances: Decimal::ZERO,
        deductions_fixed: Decimal::ZERO,
    };

    c.bench_function("offer_totals", |b| {
        b.iter(|| compute_offer_totals(black_box(&inputs), &policy).expect("totals succeed"))
    });
}

criterion_group!(
    benches,
    bench_holiday_compensation,
    bench_initialize,
    bench_rollover,
    bench_offer_totals
);
criterion_main!(benches);
