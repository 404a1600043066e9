use chrono::NaiveDate;

/// The user's currently chosen, not-yet-submitted (date, time) pair.
///
/// Both halves are set together or not at all; there is no partial
/// selection. The interaction layer owns one of these, mutates it on
/// slot clicks and clears it after a successful submission or a view
/// reset.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Selection {
    chosen: Option<(NaiveDate, String)>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    /// Records `date` and `time` as the chosen pair, replacing any
    /// previous choice.
    ///
    /// Inputs are trusted: the caller gates this behind
    /// [`AvailabilitySnapshot::is_selectable`](crate::slot::AvailabilitySnapshot::is_selectable).
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::selection::Selection;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let mut selection = Selection::new();
    ///
    /// selection.select(date, "08:00");
    /// assert!(selection.is_selected(date, "08:00"));
    /// assert!(!selection.is_selected(date, "09:00"));
    ///
    /// selection.clear();
    /// assert!(!selection.is_selected(date, "08:00"));
    /// assert!(selection.is_empty());
    /// ```
    pub fn select(&mut self, date: NaiveDate, time: &str) {
        self.chosen = Some((date, time.to_string()));
    }

    /// Resets to no selection.
    pub fn clear(&mut self) {
        self.chosen = None;
    }

    /// True iff `date` and `time` are the chosen pair.
    pub fn is_selected(&self, date: NaiveDate, time: &str) -> bool {
        match &self.chosen {
            Some((chosen_date, chosen_time)) => *chosen_date == date && chosen_time == time,
            None => false,
        }
    }

    /// The chosen pair, if any.
    pub fn selected(&self) -> Option<(NaiveDate, &str)> {
        self.chosen
            .as_ref()
            .map(|(date, time)| (*date, time.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_none()
    }
}
