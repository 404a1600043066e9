use crate::booking::{BookingError, BookingGateway, BookingReceipt, BookingRequest, ClientDetails};
use crate::selection::Selection;
use crate::slot::{is_past, AvailabilitySnapshot};
use crate::week::{FirstDayOfWeek, WeekRange};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};

/// Render state of a single agenda cell, precedence highest first.
///
/// The rendering layer maps these to whatever markup or styling it
/// likes; this crate never emits markup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotDisplay {
    /// The user's current pick.
    Selected,
    /// No slot with this label exists on that date.
    Missing,
    /// The slot's instant is already behind `now`.
    Past,
    /// Exists and open for booking.
    Available,
    /// Exists but closed or already booked.
    Unavailable,
}

/// The booking widget's interaction state: one availability snapshot,
/// the week on display and the user's selection.
///
/// This is the explicit context object callers pass around; there is no
/// ambient singleton and no event plumbing in here. UI events arrive as
/// plain method calls ([`navigate_week`](Agenda::navigate_week),
/// [`select_slot`](Agenda::select_slot)) and the renderer reads state
/// back out ([`slot_display`](Agenda::slot_display)).
#[derive(Debug, Clone)]
pub struct Agenda {
    snapshot: AvailabilitySnapshot,
    week: WeekRange,
    selection: Selection,
    first_day: FirstDayOfWeek,
    last_load: u64,
}

impl Agenda {
    /// Opens the agenda on the week containing `today`, with no data
    /// loaded yet.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::agenda::Agenda;
    /// use agenda_libs::week::FirstDayOfWeek;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    /// let agenda = Agenda::new(today, FirstDayOfWeek::Monday);
    ///
    /// assert_eq!(
    ///     agenda.week().start(),
    ///     NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
    /// );
    /// assert!(agenda.selection().is_empty());
    /// ```
    pub fn new(today: NaiveDate, first_day: FirstDayOfWeek) -> Agenda {
        Agenda {
            snapshot: AvailabilitySnapshot::default(),
            week: WeekRange::containing(today, first_day),
            selection: Selection::new(),
            first_day,
            last_load: 0,
        }
    }

    pub fn week(&self) -> WeekRange {
        self.week
    }

    /// The seven dates of the week on display, for the grid's header
    /// row.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::agenda::Agenda;
    /// use agenda_libs::week::FirstDayOfWeek;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    /// let agenda = Agenda::new(today, FirstDayOfWeek::Monday);
    ///
    /// let labels: Vec<_> = agenda.week_label_dates().collect();
    /// assert_eq!(labels.len(), 7);
    /// assert_eq!(labels[0], agenda.week().start());
    /// assert_eq!(labels[6], agenda.week().end());
    /// ```
    pub fn week_label_dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.week.days()
    }

    pub fn snapshot(&self) -> &AvailabilitySnapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the availability snapshot wholesale.
    ///
    /// `seq` is the caller's monotonically increasing load counter: a
    /// snapshot from a superseded load arriving late is discarded, so
    /// a slow response can never clobber a newer one. Accepting a
    /// snapshot clears the selection, since the pick may no longer be
    /// valid against the fresh data.
    ///
    /// Returns whether the snapshot was accepted.
    pub fn set_snapshot(&mut self, seq: u64, snapshot: AvailabilitySnapshot) -> bool {
        if seq < self.last_load {
            debug!("discarding stale snapshot (load {} < {})", seq, self.last_load);
            return false;
        }

        info!(
            "snapshot replaced: load {}, {} days of data",
            seq,
            snapshot.days.len()
        );
        self.last_load = seq;
        self.snapshot = snapshot;
        self.selection.clear();
        true
    }

    /// Week navigation command: moves by `delta` whole weeks, but never
    /// before the week containing `today`.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::agenda::Agenda;
    /// use agenda_libs::week::FirstDayOfWeek;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    /// let mut agenda = Agenda::new(today, FirstDayOfWeek::Monday);
    /// let home = agenda.week();
    ///
    /// // going back from the current week is a no-op
    /// assert_eq!(agenda.navigate_week(-1, today), home);
    ///
    /// assert_eq!(agenda.navigate_week(1, today), home.succ());
    /// assert_eq!(agenda.navigate_week(-1, today), home);
    /// ```
    pub fn navigate_week(&mut self, delta: i64, today: NaiveDate) -> WeekRange {
        let floor = WeekRange::containing(today, self.first_day);
        let target = self.week.offset(delta);

        self.week = if target.start() < floor.start() {
            floor
        } else {
            target
        };
        debug!("week on display now starts {}", self.week.start());
        self.week
    }

    /// True when the displayed week is the one containing `today`,
    /// which is when the previous-week control should be disabled.
    pub fn at_current_week(&self, today: NaiveDate) -> bool {
        self.week.start() == WeekRange::containing(today, self.first_day).start()
    }

    /// Slot click command: records the pick only for an open, future
    /// slot. Clicks on anything else are a no-op, not an error.
    ///
    /// Returns whether the selection changed.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::agenda::Agenda;
    /// use agenda_libs::slot::{AvailabilitySnapshot, Slot};
    /// use agenda_libs::week::FirstDayOfWeek;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let now = today.and_hms_opt(7, 0, 0).unwrap();
    ///
    /// let mut snapshot = AvailabilitySnapshot::default();
    /// snapshot.push_slot(today, "manha", Slot::new("08:00", true, false));
    /// snapshot.push_slot(today, "manha", Slot::new("09:00", false, false));
    ///
    /// let mut agenda = Agenda::new(today, FirstDayOfWeek::Monday);
    /// agenda.set_snapshot(1, snapshot);
    ///
    /// assert!(!agenda.select_slot(today, "09:00", now)); // closed
    /// assert!(agenda.select_slot(today, "08:00", now));
    /// assert!(agenda.selection().is_selected(today, "08:00"));
    /// ```
    pub fn select_slot(&mut self, date: NaiveDate, time: &str, now: NaiveDateTime) -> bool {
        if !self.snapshot.is_selectable(date, time, now) {
            return false;
        }

        self.selection.select(date, time);
        info!("selected slot {} {}", date, time);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Per-cell render state for the agenda grid.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::agenda::{Agenda, SlotDisplay};
    /// use agenda_libs::slot::{AvailabilitySnapshot, Slot};
    /// use agenda_libs::week::FirstDayOfWeek;
    /// use chrono::NaiveDate;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let now = today.and_hms_opt(8, 30, 0).unwrap();
    ///
    /// let mut snapshot = AvailabilitySnapshot::default();
    /// snapshot.push_slot(today, "manha", Slot::new("08:00", true, false));
    /// snapshot.push_slot(today, "manha", Slot::new("09:00", true, false));
    /// snapshot.push_slot(today, "manha", Slot::new("10:00", true, true));
    ///
    /// let mut agenda = Agenda::new(today, FirstDayOfWeek::Monday);
    /// agenda.set_snapshot(1, snapshot);
    /// agenda.select_slot(today, "09:00", now);
    ///
    /// assert_eq!(agenda.slot_display(today, "09:00", now), SlotDisplay::Selected);
    /// assert_eq!(agenda.slot_display(today, "08:00", now), SlotDisplay::Past);
    /// assert_eq!(agenda.slot_display(today, "10:00", now), SlotDisplay::Unavailable);
    /// assert_eq!(agenda.slot_display(today, "11:00", now), SlotDisplay::Missing);
    /// ```
    pub fn slot_display(&self, date: NaiveDate, time: &str, now: NaiveDateTime) -> SlotDisplay {
        if self.selection.is_selected(date, time) {
            SlotDisplay::Selected
        } else if !self.snapshot.exists(date, time) {
            SlotDisplay::Missing
        } else if is_past(date, time, now) {
            SlotDisplay::Past
        } else if self.snapshot.is_available(date, time) {
            SlotDisplay::Available
        } else {
            SlotDisplay::Unavailable
        }
    }

    /// Builds the booking request for the current selection, submits it
    /// through `gateway` and clears the selection on success.
    ///
    /// The city and condominium come from the loaded snapshot's header;
    /// `created_at` is injected like every other timestamp in this
    /// crate.
    pub fn confirm_booking<G: BookingGateway>(
        &mut self,
        gateway: &mut G,
        client: ClientDetails,
        created_at: NaiveDateTime,
    ) -> Result<BookingReceipt, BookingError> {
        let (date, time) = match self.selection.selected() {
            Some((date, time)) => (date, time.to_string()),
            None => return Err(BookingError::NothingSelected),
        };

        let request = BookingRequest::new(
            client,
            date,
            &time,
            &self.snapshot.info.city,
            &self.snapshot.info.condominium,
            created_at,
        )?;

        let receipt = gateway.submit(&request)?;
        self.selection.clear();
        Ok(receipt)
    }
}
