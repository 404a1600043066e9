use crate::config::SlotGrid;
use crate::slot::{AvailabilitySnapshot, CondominiumInfo, Slot};
use chrono::{Duration, NaiveDate};
use log::debug;
use rand::Rng;

/// Probability that a generated slot is open.
const AVAILABLE_CHANCE: f64 = 0.7;

/// Generates a randomized 7-day availability snapshot starting at
/// `start`, covering every slot time of `grid`.
///
/// Stands in for the real data source during demos and tests. The RNG
/// is injected so callers that need reproducible data can seed one.
///
/// # Examples
/// ```
/// use agenda_libs::config::SlotGrid;
/// use agenda_libs::mock::mock_week;
/// use agenda_libs::slot::CondominiumInfo;
/// use chrono::NaiveDate;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 13).unwrap();
/// let grid = SlotGrid::default();
/// let info = CondominiumInfo::new("Canto da Natureza", "Jundiaí", "leste");
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let snapshot = mock_week(&mut rng, start, &grid, info);
///
/// assert_eq!(snapshot.days.len(), 7);
/// // every grid slot exists on every generated day
/// assert!(snapshot.exists(start, "08:00"));
/// assert!(snapshot.exists(start, "17:30"));
/// ```
pub fn mock_week<R: Rng>(
    rng: &mut R,
    start: NaiveDate,
    grid: &SlotGrid,
    info: CondominiumInfo,
) -> AvailabilitySnapshot {
    let mut snapshot = AvailabilitySnapshot::new(info);

    for date in (0..7).map(|offset| start + Duration::days(offset)) {
        for period in &grid.periods {
            for time in &period.slots {
                let available = rng.gen_bool(AVAILABLE_CHANCE);
                snapshot.push_slot(date, &period.key, Slot::new(time, available, false));
            }
        }
    }

    debug!("generated mock availability for 7 days from {}", start);
    snapshot
}
