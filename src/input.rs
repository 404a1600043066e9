use crate::config::SlotGrid;
use crate::slot::{AvailabilitySnapshot, CondominiumInfo, Slot};
use crate::week::WeekRange;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Validation failures while turning a legacy payload into an
/// [`AvailabilitySnapshot`].
#[derive(Error, Debug, Eq, PartialEq)]
pub enum InputError {
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid time {0:?}: expected HH:MM")]
    InvalidTime(String),
    #[error("invalid availability flag {0:?}: expected true or false")]
    InvalidFlag(String),
    #[error("unknown weekday key {0:?}")]
    UnknownWeekday(String),
    #[error("duplicate slot {time} in {period} of {date}")]
    DuplicateSlot {
        date: NaiveDate,
        period: String,
        time: String,
    },
    #[error("malformed JSON payload: {0}")]
    Json(String),
    #[error("malformed CSV payload: {0}")]
    Csv(String),
}

/// The sheet-backed JSON shape: availability keyed by weekday name, as
/// a repeating weekly template.
///
/// ```json
/// {
///   "condominio": "Vila da Terra",
///   "cidade": "Jundiaí",
///   "microRegiao": "norte",
///   "horariosDisponiveis": {
///     "segunda": { "manha": ["08:00", "08:30"], "tarde": ["13:00"] }
///   }
/// }
/// ```
///
/// A listed time means the slot exists and is open; this shape has no
/// notion of a booked slot.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct WeekdayTemplate {
    pub condominio: String,
    pub cidade: String,
    #[serde(rename = "microRegiao")]
    pub micro_regiao: String,
    #[serde(rename = "horariosDisponiveis")]
    pub horarios_disponiveis: HashMap<String, HashMap<String, Vec<String>>>,
}

impl WeekdayTemplate {
    pub fn from_json(payload: &str) -> Result<WeekdayTemplate, InputError> {
        serde_json::from_str(payload).map_err(|e| InputError::Json(e.to_string()))
    }

    /// Projects the weekly template onto the concrete dates of `week`.
    ///
    /// Every listed time becomes an open, unbooked slot on each date of
    /// `week` whose weekday appears in the template. Weekday keys the
    /// template invented are rejected rather than silently skipped.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::input::WeekdayTemplate;
    /// use agenda_libs::week::{FirstDayOfWeek, WeekRange};
    /// use chrono::NaiveDate;
    ///
    /// let template = WeekdayTemplate::from_json(
    ///     r#"{
    ///         "condominio": "Vila da Terra",
    ///         "cidade": "Jundiaí",
    ///         "horariosDisponiveis": {
    ///             "segunda": { "manha": ["08:00", "08:30"] }
    ///         }
    ///     }"#,
    /// )
    /// .unwrap();
    ///
    /// let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let week = WeekRange::containing(monday, FirstDayOfWeek::Monday);
    /// let snapshot = template.project(week).unwrap();
    ///
    /// assert!(snapshot.is_available(monday, "08:00"));
    /// // Tuesday has no template entry
    /// let tuesday = monday.succ_opt().unwrap();
    /// assert!(!snapshot.exists(tuesday, "08:00"));
    /// ```
    pub fn project(&self, week: WeekRange) -> Result<AvailabilitySnapshot, InputError> {
        for key in self.horarios_disponiveis.keys() {
            if !WEEKDAY_KEYS.iter().any(|(name, _)| *name == key.as_str()) {
                return Err(InputError::UnknownWeekday(key.clone()));
            }
        }

        let info = CondominiumInfo::new(&self.condominio, &self.cidade, &self.micro_regiao);
        let mut snapshot = AvailabilitySnapshot::new(info);

        for date in week.days() {
            let day_template = match self.horarios_disponiveis.get(weekday_key(date.weekday())) {
                Some(day) => day,
                None => continue,
            };

            // HashMap order is arbitrary; sorting the period keys keeps
            // manha ahead of tarde.
            for (period, times) in day_template.iter().sorted_by(|a, b| Ord::cmp(&a.0, &b.0)) {
                for time in times {
                    parse_time(time)?;
                    snapshot.push_slot(date, period, Slot::new(time, true, false));
                }
            }
        }

        finish(snapshot)
    }
}

/// One day of the dated-records JSON shape, as produced by the mock
/// fetch of the later widget variant.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DayRecord {
    pub date: String,
    /// Weekday name carried alongside the date; informational only.
    #[serde(default)]
    pub day: String,
    pub slots: HashMap<String, Vec<SlotRecord>>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SlotRecord {
    pub time: String,
    pub available: bool,
    #[serde(default)]
    pub booked: bool,
}

pub fn day_records_from_json(payload: &str) -> Result<Vec<DayRecord>, InputError> {
    serde_json::from_str(payload).map_err(|e| InputError::Json(e.to_string()))
}

/// Builds a snapshot from dated slot records.
///
/// # Examples
/// ```
/// use agenda_libs::input::{day_records_from_json, from_day_records};
/// use agenda_libs::slot::CondominiumInfo;
/// use chrono::NaiveDate;
///
/// let records = day_records_from_json(
///     r#"[{
///         "date": "2024-05-13",
///         "day": "segunda",
///         "slots": {
///             "manha": [
///                 { "time": "08:00", "available": true },
///                 { "time": "09:00", "available": true, "booked": true }
///             ]
///         }
///     }]"#,
/// )
/// .unwrap();
///
/// let info = CondominiumInfo::new("Vila do Bosque", "Jundiaí", "norte");
/// let snapshot = from_day_records(info, &records).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
/// assert!(snapshot.is_available(date, "08:00"));
/// assert!(snapshot.exists(date, "09:00"));
/// assert!(!snapshot.is_available(date, "09:00"));
/// ```
pub fn from_day_records(
    info: CondominiumInfo,
    records: &[DayRecord],
) -> Result<AvailabilitySnapshot, InputError> {
    let mut snapshot = AvailabilitySnapshot::new(info);

    for record in records {
        let date = parse_date(&record.date)?;
        for (period, slots) in record.slots.iter().sorted_by(|a, b| Ord::cmp(&a.0, &b.0)) {
            for slot in slots {
                parse_time(&slot.time)?;
                snapshot.push_slot(
                    date,
                    period,
                    Slot::new(&slot.time, slot.available, slot.booked),
                );
            }
        }
    }

    finish(snapshot)
}

/// A row of the published-sheet CSV export: `Date,Time,Available`.
#[derive(Deserialize, Debug, Clone)]
struct SheetRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Available")]
    available: String,
}

/// Builds a snapshot from the flat CSV rows a published sheet exports.
///
/// Rows carry no period, so each time is filed under the grid period it
/// belongs to. Unparseable rows are errors, not silent drops.
///
/// # Examples
/// ```
/// use agenda_libs::config::SlotGrid;
/// use agenda_libs::input::from_sheet_csv;
/// use agenda_libs::slot::CondominiumInfo;
/// use chrono::NaiveDate;
///
/// let csv = "Date,Time,Available\n\
///            2024-05-13,08:00,true\n\
///            2024-05-13,13:00,FALSE\n";
///
/// let info = CondominiumInfo::new("Vila dos Lagos", "Jundiaí", "sul");
/// let snapshot = from_sheet_csv(info, &SlotGrid::default(), csv).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
/// assert!(snapshot.is_available(date, "08:00"));
/// assert!(snapshot.exists(date, "13:00"));
/// assert!(!snapshot.is_available(date, "13:00"));
/// ```
pub fn from_sheet_csv(
    info: CondominiumInfo,
    grid: &SlotGrid,
    payload: &str,
) -> Result<AvailabilitySnapshot, InputError> {
    let mut snapshot = AvailabilitySnapshot::new(info);
    let mut reader = csv::Reader::from_reader(payload.as_bytes());

    let mut rows = 0_usize;
    for row in reader.deserialize::<SheetRow>() {
        let row = row.map_err(|e| InputError::Csv(e.to_string()))?;
        let date = parse_date(&row.date)?;
        parse_time(&row.time)?;
        let available = parse_flag(&row.available)?;

        snapshot.push_slot(
            date,
            grid.period_for(&row.time),
            Slot::new(&row.time, available, false),
        );
        rows += 1;
    }

    debug!("parsed {} sheet rows", rows);
    finish(snapshot)
}

/// Orders each period chronologically and rejects duplicate times, so
/// every snapshot leaving this module upholds the data-model
/// invariants by construction.
fn finish(mut snapshot: AvailabilitySnapshot) -> Result<AvailabilitySnapshot, InputError> {
    for (date, day) in snapshot.days.iter_mut() {
        for period in day.periods.iter_mut() {
            period.slots.sort_by(|a, b| a.time.cmp(&b.time));

            if let Some((_, duplicate)) = period
                .slots
                .iter()
                .tuple_windows()
                .find(|(a, b)| a.time == b.time)
            {
                return Err(InputError::DuplicateSlot {
                    date: *date,
                    period: period.name.clone(),
                    time: duplicate.time.clone(),
                });
            }
        }
    }

    info!(
        "built availability snapshot covering {} days",
        snapshot.days.len()
    );
    Ok(snapshot)
}

const WEEKDAY_KEYS: [(&str, Weekday); 7] = [
    ("domingo", Weekday::Sun),
    ("segunda", Weekday::Mon),
    ("terca", Weekday::Tue),
    ("quarta", Weekday::Wed),
    ("quinta", Weekday::Thu),
    ("sexta", Weekday::Fri),
    ("sabado", Weekday::Sat),
];

fn weekday_key(weekday: Weekday) -> &'static str {
    WEEKDAY_KEYS
        .iter()
        .find(|(_, day)| *day == weekday)
        .map(|(name, _)| *name)
        .unwrap_or("domingo")
}

fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| InputError::InvalidDate(raw.to_string()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| InputError::InvalidTime(raw.to_string()))
}

fn parse_flag(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(InputError::InvalidFlag(raw.to_string())),
    }
}
