use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single bookable time unit on a given date.
///
/// `time` is the 24-hour `HH:MM` label; slots are compared by exact
/// string equality on that label, never by interval overlap.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct Slot {
    pub time: String,
    pub available: bool,
    #[serde(default)]
    pub booked: bool,
}

impl Slot {
    /// Constructs a new Slot
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::slot::Slot;
    ///
    /// let slot = Slot::new("08:00", true, false);
    /// assert_eq!(slot.time, "08:00");
    /// assert!(slot.is_open());
    /// ```
    pub fn new(time: &str, available: bool, booked: bool) -> Slot {
        Slot {
            time: time.to_string(),
            available,
            booked,
        }
    }

    /// Flagged available and not yet booked. A booking always wins over
    /// the availability flag.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::slot::Slot;
    ///
    /// assert!(Slot::new("09:00", true, false).is_open());
    /// assert!(!Slot::new("09:00", true, true).is_open());
    /// assert!(!Slot::new("09:00", false, false).is_open());
    /// ```
    pub fn is_open(&self) -> bool {
        self.available && !self.booked
    }
}

/// A named subdivision of the day (morning, afternoon) grouping slots
/// for display. Slots are kept in chronological order.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct PeriodSlots {
    pub name: String,
    pub slots: Vec<Slot>,
}

/// One day's periods, in display order.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct DaySlots {
    pub periods: Vec<PeriodSlots>,
}

impl DaySlots {
    /// Looks a slot up by its exact `HH:MM` label across all periods.
    pub fn slot(&self, time: &str) -> Option<&Slot> {
        self.periods
            .iter()
            .flat_map(|period| period.slots.iter())
            .find(|slot| slot.time == time)
    }
}

/// The condominium header shown above the agenda grid.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct CondominiumInfo {
    pub condominium: String,
    pub city: String,
    pub micro_region: String,
}

impl CondominiumInfo {
    pub fn new(condominium: &str, city: &str, micro_region: &str) -> CondominiumInfo {
        CondominiumInfo {
            condominium: condominium.to_string(),
            city: city.to_string(),
            micro_region: micro_region.to_string(),
        }
    }
}

/// One data load's worth of per-day availability.
///
/// A snapshot is immutable once handed to the widget: each reload
/// builds a fresh snapshot that replaces the previous one wholesale.
/// A date with no entry answers `false` to every query, exactly like a
/// date whose slots are all taken.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct AvailabilitySnapshot {
    pub info: CondominiumInfo,
    pub days: BTreeMap<NaiveDate, DaySlots>,
}

impl AvailabilitySnapshot {
    pub fn new(info: CondominiumInfo) -> AvailabilitySnapshot {
        AvailabilitySnapshot {
            info,
            days: BTreeMap::new(),
        }
    }

    /// Appends a slot to `period` on `date`, creating the day and the
    /// period as needed. Periods keep their insertion order.
    pub fn push_slot(&mut self, date: NaiveDate, period: &str, slot: Slot) {
        let day = self.days.entry(date).or_default();
        match day.periods.iter_mut().find(|p| p.name == period) {
            Some(p) => p.slots.push(slot),
            None => day.periods.push(PeriodSlots {
                name: period.to_string(),
                slots: vec![slot],
            }),
        }
    }

    /// True iff some period on `date` holds a slot labelled exactly
    /// `time`, regardless of its availability.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::slot::{AvailabilitySnapshot, Slot};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let mut snapshot = AvailabilitySnapshot::default();
    /// snapshot.push_slot(date, "manha", Slot::new("08:00", true, false));
    ///
    /// assert!(snapshot.exists(date, "08:00"));
    /// assert!(!snapshot.exists(date, "09:00"));
    ///
    /// let next_day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
    /// assert!(!snapshot.exists(next_day, "08:00"));
    /// ```
    pub fn exists(&self, date: NaiveDate, time: &str) -> bool {
        self.days
            .get(&date)
            .and_then(|day| day.slot(time))
            .is_some()
    }

    /// True iff the slot exists and is open for booking.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::slot::{AvailabilitySnapshot, Slot};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let mut snapshot = AvailabilitySnapshot::default();
    /// snapshot.push_slot(date, "manha", Slot::new("08:00", true, false));
    /// snapshot.push_slot(date, "manha", Slot::new("09:00", true, true));
    ///
    /// assert!(snapshot.is_available(date, "08:00"));
    /// // booked overrides the availability flag
    /// assert!(!snapshot.is_available(date, "09:00"));
    /// assert!(!snapshot.is_available(date, "10:00"));
    /// ```
    pub fn is_available(&self, date: NaiveDate, time: &str) -> bool {
        self.days
            .get(&date)
            .and_then(|day| day.slot(time))
            .map_or(false, Slot::is_open)
    }

    /// Open for booking *and* not already behind `now`.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::slot::{AvailabilitySnapshot, Slot};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let mut snapshot = AvailabilitySnapshot::default();
    /// snapshot.push_slot(date, "manha", Slot::new("08:00", true, false));
    ///
    /// let before = date.pred_opt().unwrap().and_hms_opt(23, 0, 0).unwrap();
    /// let after = date.and_hms_opt(9, 0, 0).unwrap();
    ///
    /// assert!(snapshot.is_selectable(date, "08:00", before));
    /// assert!(!snapshot.is_selectable(date, "08:00", after));
    /// ```
    pub fn is_selectable(&self, date: NaiveDate, time: &str, now: NaiveDateTime) -> bool {
        let selectable = self.is_available(date, time) && !is_past(date, time, now);
        trace!("is_selectable({}, {}) = {}", date, time, selectable);
        selectable
    }
}

/// True iff the instant formed by `date` and the `HH:MM` label `time`
/// lies strictly before `now`, at minute precision.
///
/// `now` is always injected by the caller; this module never reads the
/// ambient clock. A label that does not parse as `HH:MM` is never in
/// the past.
///
/// # Examples
/// ```
/// use agenda_libs::slot::is_past;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let later = date.and_hms_opt(9, 0, 0).unwrap();
/// assert!(is_past(date, "08:00", later));
///
/// let previous_evening = NaiveDate::from_ymd_opt(2023, 12, 31)
///     .unwrap()
///     .and_hms_opt(23, 0, 0)
///     .unwrap();
/// assert!(!is_past(date, "08:00", previous_evening));
///
/// // the slot's own minute is not yet past
/// let exactly = date.and_hms_opt(8, 0, 0).unwrap();
/// assert!(!is_past(date, "08:00", exactly));
/// ```
pub fn is_past(date: NaiveDate, time: &str, now: NaiveDateTime) -> bool {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(parsed) => date.and_time(parsed) < now,
        Err(_) => false,
    }
}
