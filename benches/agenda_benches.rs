use agenda_libs::config::SlotGrid;
use agenda_libs::input::{from_day_records, from_sheet_csv, DayRecord, SlotRecord, WeekdayTemplate};
use agenda_libs::mock::mock_week;
use agenda_libs::slot::CondominiumInfo;
use agenda_libs::week::{FirstDayOfWeek, WeekRange};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn info() -> CondominiumInfo {
    CondominiumInfo::new("Vila da Terra", "Jundiaí", "norte")
}

fn queries_and_adapters(c: &mut Criterion) {
    c.bench_function("week_containing", |b| {
        let reference = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();

        b.iter(|| black_box(WeekRange::containing(reference, FirstDayOfWeek::Monday)));
    });

    c.bench_function("snapshot_is_selectable", |b| {
        let start = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let grid = SlotGrid::default();
        let mut rng = StdRng::seed_from_u64(1);
        let snapshot = mock_week(&mut rng, start, &grid, info());
        let now = start.and_hms_opt(9, 0, 0).unwrap();

        b.iter(|| {
            for date in (0..7).map(|offset| start + Duration::days(offset)) {
                for time in grid.slot_times() {
                    black_box(snapshot.is_selectable(date, time, now));
                }
            }
        });
    });

    c.bench_function("project_weekday_template", |b| {
        let template = WeekdayTemplate::from_json(
            r#"{
                "condominio": "Vila da Terra",
                "cidade": "Jundiaí",
                "microRegiao": "norte",
                "horariosDisponiveis": {
                    "segunda": { "manha": ["08:00", "08:30", "09:00"], "tarde": ["13:00"] },
                    "terca": { "manha": ["08:00"] },
                    "quarta": { "manha": ["09:00"], "tarde": ["13:00", "13:30"] },
                    "quinta": { "tarde": ["14:00"] },
                    "sexta": { "manha": ["10:00", "10:30"] }
                }
            }"#,
        )
        .unwrap();
        let week = WeekRange::containing(
            NaiveDate::from_ymd_opt(2024, 5, 13).unwrap(),
            FirstDayOfWeek::Monday,
        );

        b.iter(|| black_box(template.project(week)));
    });

    c.bench_function("from_day_records", |b| {
        let grid = SlotGrid::default();
        let start = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let records: Vec<DayRecord> = (0..7)
            .map(|offset| {
                let date = start + Duration::days(offset);
                let mut slots = HashMap::new();
                for period in &grid.periods {
                    slots.insert(
                        period.key.clone(),
                        period
                            .slots
                            .iter()
                            .map(|time| SlotRecord {
                                time: time.clone(),
                                available: true,
                                booked: false,
                            })
                            .collect(),
                    );
                }
                DayRecord {
                    date: date.to_string(),
                    day: String::new(),
                    slots,
                }
            })
            .collect();

        b.iter(|| black_box(from_day_records(info(), &records)));
    });

    c.bench_function("from_sheet_csv", |b| {
        let grid = SlotGrid::default();
        let start = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
        let mut payload = String::from("Date,Time,Available\n");
        for offset in 0..7 {
            let date = start + Duration::days(offset);
            for (index, time) in grid.slot_times().enumerate() {
                let flag = if index % 3 == 0 { "false" } else { "true" };
                payload.push_str(&format!("{},{},{}\n", date, time, flag));
            }
        }

        b.iter(|| black_box(from_sheet_csv(info(), &grid, &payload)));
    });
}

criterion_group!(benches, queries_and_adapters);
criterion_main!(benches);
