use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which weekday opens the displayed week.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FirstDayOfWeek {
    Sunday,
    Monday,
}

impl Default for FirstDayOfWeek {
    fn default() -> Self {
        FirstDayOfWeek::Monday
    }
}

/// Inclusive [start, end] calendar week
/// `end` is always `start + 6 days`, and `start` falls on the
/// configured first day of the week.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct WeekRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl WeekRange {
    /// Computes the week containing `reference`.
    ///
    /// The result depends only on the calendar date, so callers holding
    /// a timestamp truncate it to a date first and the time of day can
    /// never shift the computed week.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::week::{FirstDayOfWeek, WeekRange};
    /// use chrono::NaiveDate;
    ///
    /// let wednesday = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
    /// let week = WeekRange::containing(wednesday, FirstDayOfWeek::Monday);
    ///
    /// assert_eq!(week.start(), NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
    /// assert_eq!(week.end(), NaiveDate::from_ymd_opt(2024, 5, 19).unwrap());
    ///
    /// // A Sunday belongs to the week that *started* the previous Monday
    /// let sunday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
    /// assert_eq!(WeekRange::containing(sunday, FirstDayOfWeek::Monday), week);
    ///
    /// // Under the Sunday convention that same date opens a new week
    /// let week = WeekRange::containing(sunday, FirstDayOfWeek::Sunday);
    /// assert_eq!(week.start(), sunday);
    /// ```
    pub fn containing(reference: NaiveDate, first_day: FirstDayOfWeek) -> WeekRange {
        let current = i64::from(reference.weekday().num_days_from_sunday());
        let offset = match first_day {
            FirstDayOfWeek::Monday => {
                if current == 0 {
                    -6
                } else {
                    1 - current
                }
            }
            FirstDayOfWeek::Sunday => -current,
        };

        let start = reference + Duration::days(offset);
        WeekRange {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Convenience function for readability
    /// Returns the first day of the week
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Convenience function for readability
    /// Returns the last day of the week
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The 7 calendar days of this week, in order.
    ///
    /// Pure and restartable: iterating twice yields the same dates.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::week::{FirstDayOfWeek, WeekRange};
    /// use chrono::NaiveDate;
    ///
    /// let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let week = WeekRange::containing(monday, FirstDayOfWeek::Monday);
    ///
    /// let days: Vec<_> = week.days().collect();
    /// assert_eq!(days.len(), 7);
    /// assert_eq!(days[0], monday);
    /// assert_eq!(days[6], week.end());
    /// assert!(days.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
    /// ```
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..7).map(move |offset| start + Duration::days(offset))
    }

    /// True iff `date` falls within this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// This week shifted by a whole number of weeks.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::week::{FirstDayOfWeek, WeekRange};
    /// use chrono::NaiveDate;
    ///
    /// let monday = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
    /// let week = WeekRange::containing(monday, FirstDayOfWeek::Monday);
    ///
    /// assert_eq!(
    ///     week.offset(1).start(),
    ///     NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    /// );
    /// assert_eq!(week.offset(1).offset(-1), week);
    /// assert_eq!(week.offset(0), week);
    /// ```
    pub fn offset(&self, weeks: i64) -> WeekRange {
        WeekRange {
            start: self.start + Duration::weeks(weeks),
            end: self.end + Duration::weeks(weeks),
        }
    }

    /// The week immediately after this one.
    pub fn succ(&self) -> WeekRange {
        self.offset(1)
    }

    /// The week immediately before this one.
    pub fn pred(&self) -> WeekRange {
        self.offset(-1)
    }
}
