//! Performance benchmarks for the attendance engine.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, Employee, EmployeeStatus, Principal, Role,
};
use attendance_engine::rules::{Coordinates, distance_meters, payroll};
use attendance_engine::store::{AttendanceStore, EmployeeStore, MemoryStore};

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Creates a store holding one employee with a fully attended month.
fn seeded_store() -> (MemoryStore, Uuid) {
    let store = MemoryStore::new();
    let employee = Employee {
        id: Uuid::new_v4(),
        name: "Bench Employee".to_string(),
        email: None,
        position: None,
        department: None,
        joined_date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
        base_salary: Decimal::from(3_000_000),
        position_allowance: Decimal::from(500_000),
        transport_allowance: Decimal::from(300_000),
        meal_allowance: Decimal::from(200_000),
        status: EmployeeStatus::Active,
        role: Role::Employee,
    };
    let employee_id = employee.id;
    store.insert_employee(employee).unwrap();

    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
    for date in first.iter_days().take_while(|d| *d <= last) {
        use chrono::Datelike;
        if date.weekday().number_from_monday() <= 5 {
            store
                .insert_attendance(AttendanceRecord {
                    id: Uuid::new_v4(),
                    employee_id,
                    date,
                    check_in: None,
                    check_out: None,
                    status: AttendanceStatus::Present,
                    note: String::new(),
                    photo_ref: None,
                })
                .unwrap();
        }
    }
    (store, employee_id)
}

fn bench_haversine(c: &mut Criterion) {
    let office = Coordinates::new(-6.2, 106.816666);
    let employee = Coordinates::new(-6.2005, 106.8162);

    c.bench_function("haversine_distance", |b| {
        b.iter(|| distance_meters(black_box(office), black_box(employee)))
    });
}

fn bench_payroll_generation(c: &mut Criterion) {
    let (store, employee_id) = seeded_store();
    let admin = Principal {
        id: Uuid::new_v4(),
        role: Role::Admin,
    };
    let now = make_datetime("2026-03-31 17:00:00");

    // the first call creates the record, the rest exercise the upsert path
    c.bench_function("payroll_generate_full_month", |b| {
        b.iter(|| {
            payroll::generate(
                black_box(&store),
                black_box(&admin),
                black_box(employee_id),
                3,
                2026,
                now,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_haversine, bench_payroll_generation);
criterion_main!(benches);
