//! Reshape raw trips into per-stop timetables.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::{ClockTime, ServiceTime, StopId, StopSchedule, Trip};

/// Build one timetable row per stop from a list of trips.
///
/// Every departure is converted to a 12-hour [`ClockTime`]; each stop's times
/// are deduplicated and sorted by time of day, and the stops are sorted by
/// name. Visits whose departure time cannot be parsed are skipped.
///
/// An empty result means there is no schedule to show.
pub fn normalize(trips: &[Trip]) -> Vec<StopSchedule> {
    // Insertion order is kept so that stops with identical names stay in the
    // order the backend first listed them.
    let mut stops: Vec<(StopId, String, BTreeSet<ClockTime>)> = Vec::new();
    let mut index: HashMap<&StopId, usize> = HashMap::new();
    let mut skipped = 0usize;

    for visit in trips.iter().flat_map(|trip| &trip.stop_times) {
        let time = match ServiceTime::parse(&visit.departure_time) {
            Ok(t) => t.to_clock(),
            Err(e) => {
                skipped += 1;
                debug!(
                    stop_id = %visit.stop_id,
                    departure_time = %visit.departure_time,
                    "skipping stop visit: {e}"
                );
                continue;
            }
        };

        let slot = *index.entry(&visit.stop_id).or_insert_with(|| {
            stops.push((visit.stop_id.clone(), visit.stop_name.clone(), BTreeSet::new()));
            stops.len() - 1
        });
        stops[slot].2.insert(time);
    }

    if skipped > 0 {
        warn!(skipped, "dropped stop visits with unparseable departure times");
    }

    let mut schedules: Vec<StopSchedule> = stops
        .into_iter()
        .map(|(stop_id, stop_name, times)| StopSchedule {
            stop_id,
            stop_name,
            times: times.into_iter().collect(),
        })
        .collect();

    schedules.sort_by(|a, b| compare_stop_names(&a.stop_name, &b.stop_name));
    schedules
}

/// Compare stop names the way a reader expects them listed.
///
/// Accents and case are ignored on the first pass, so "École Rd" sorts with
/// the other E names. Names equal on the base letters order unaccented
/// before accented, then lowercase before uppercase.
pub fn compare_stop_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.nfd()
                .flat_map(char::to_lowercase)
                .cmp(b.nfd().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .find(|(x, y)| x != y)
                .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()))
                .unwrap_or(Ordering::Equal)
        })
}

/// Lower-cased letters with combining accents removed.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
