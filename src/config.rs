use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named period of the day and the slot times it offers, in
/// chronological order.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct PeriodConfig {
    pub key: String,
    pub label: String,
    pub slots: Vec<String>,
}

/// The fixed grid of periods and slot times a condominium can offer.
///
/// The weekday-template adapter and the mock generator both draw their
/// slot labels from here, so every produced snapshot shares one
/// vocabulary of times.
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
pub struct SlotGrid {
    pub periods: Vec<PeriodConfig>,
}

impl SlotGrid {
    /// The key of the period a `HH:MM` label belongs to.
    ///
    /// Labels listed in the grid resolve to their own period; anything
    /// else falls back on the before-noon rule the legacy sheet data
    /// used (morning before 12:00, afternoon from then on).
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::config::SlotGrid;
    ///
    /// let grid = SlotGrid::default();
    /// assert_eq!(grid.period_for("08:30"), "manha");
    /// assert_eq!(grid.period_for("14:00"), "tarde");
    /// assert_eq!(grid.period_for("12:15"), "tarde");
    /// ```
    pub fn period_for(&self, time: &str) -> &str {
        if let Some(period) = self
            .periods
            .iter()
            .find(|period| period.slots.iter().any(|slot| slot == time))
        {
            return &period.key;
        }

        let before_noon = time
            .split(':')
            .next()
            .and_then(|hour| hour.parse::<u32>().ok())
            .map_or(true, |hour| hour < 12);

        let fallback = if before_noon {
            self.periods.first()
        } else {
            self.periods.last()
        };

        fallback.map_or("", |period| &period.key)
    }

    /// Every slot label in the grid, period by period.
    pub fn slot_times(&self) -> impl Iterator<Item = &str> {
        self.periods
            .iter()
            .flat_map(|period| period.slots.iter().map(String::as_str))
    }
}

impl Default for SlotGrid {
    /// The production grid: 30-minute slots, mornings 08:00-11:30 and
    /// afternoons 13:00-17:30.
    fn default() -> Self {
        SlotGrid {
            periods: vec![
                PeriodConfig {
                    key: "manha".to_string(),
                    label: "Manhã".to_string(),
                    slots: half_hour_grid(8, 11),
                },
                PeriodConfig {
                    key: "tarde".to_string(),
                    label: "Tarde".to_string(),
                    slots: half_hour_grid(13, 17),
                },
            ],
        }
    }
}

fn half_hour_grid(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..=end_hour)
        .flat_map(|hour| vec![format!("{:02}:00", hour), format!("{:02}:30", hour)])
        .collect()
}

/// City to condominium mapping used to populate the location pickers.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Locations {
    pub cities: BTreeMap<String, Vec<String>>,
}

impl Locations {
    /// The demo deployment's pickers.
    ///
    /// # Examples
    /// ```
    /// use agenda_libs::config::Locations;
    ///
    /// let locations = Locations::demo();
    /// assert!(locations
    ///     .condominiums("Jundiaí")
    ///     .contains(&"Vila da Terra".to_string()));
    /// assert!(locations.condominiums("Atlantis").is_empty());
    /// ```
    pub fn demo() -> Locations {
        let mut cities = BTreeMap::new();
        cities.insert(
            "Jundiaí".to_string(),
            vec![
                "Vila da Terra".to_string(),
                "Vila do Bosque".to_string(),
                "Vila dos Lagos".to_string(),
                "Canto da Natureza".to_string(),
            ],
        );
        Locations { cities }
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }

    /// Condominiums available in `city`, empty for unknown cities.
    pub fn condominiums(&self, city: &str) -> &[String] {
        self.cities.get(city).map_or(&[], Vec::as_slice)
    }
}
