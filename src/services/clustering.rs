// SPDX-License-Identifier: MIT

//! Temporal clustering of visits into trip candidates.
//!
//! Two consecutive visits belong to the same trip when the second starts on
//! the same day the first ends (a same-day transition from one campsite to
//! the next, with no day spent at home in between). Any gap closes the trip.

use crate::models::{TripCandidate, UnassignedVisit};

/// Group visits into trip candidates.
///
/// Visits are sorted by `date_from` ascending before the walk, so input order
/// does not matter; equal start dates keep their relative order (stable sort).
/// `max_gap_days` widens the adjacency rule: a visit joins the current trip
/// when it starts between 0 and `max_gap_days` whole days after the trip's
/// current end. Overlapping dates are not expected in real data and close the
/// trip rather than joining it.
pub fn group_into_trips(mut visits: Vec<UnassignedVisit>, max_gap_days: i64) -> Vec<TripCandidate> {
    visits.sort_by_key(|v| v.date_from);

    let mut trips = Vec::new();
    let mut current: Option<TripCandidate> = None;

    for visit in visits {
        let Some(mut trip) = current.take() else {
            current = Some(new_candidate(visit));
            continue;
        };

        let days_between = (visit.date_from - trip.end_date).num_days();

        if (0..=max_gap_days).contains(&days_between) {
            trip.end_date = visit.date_to;
            trip.visits.push(visit);
            current = Some(trip);
        } else {
            trips.push(trip);
            current = Some(new_candidate(visit));
        }
    }

    if let Some(trip) = current {
        trips.push(trip);
    }

    trips
}

fn new_candidate(visit: UnassignedVisit) -> TripCandidate {
    TripCandidate {
        start_date: visit.date_from,
        end_date: visit.date_to,
        visits: vec![visit],
    }
}
