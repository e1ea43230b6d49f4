//! Monthly gap filling for the full-horizon view.

use crate::core::price::{AlignedPoint, MonthKey};
use std::collections::HashSet;
use tracing::debug;

/// Linear blend of `v0` and `v1` at fraction `f` of the way from one to the other.
pub fn lerp(v0: f64, v1: f64, f: f64) -> f64 {
    v0 + (v1 - v0) * f
}

/// Fills every calendar month between the first and last observation that has
/// no observation of its own, yielding exactly one point per month.
///
/// When a month holds several observations only the latest is kept, so a
/// trailing "today" point replaces the monthly point it shares a month with.
/// Synthesised points are dated on the first of their month and both prices
/// are interpolated linearly in time between the nearest known neighbours.
/// Kept observations are returned untouched. The walk ends at the month of
/// the last observation, so nothing is produced past the known data.
pub fn fill_monthly_gaps(points: &[AlignedPoint]) -> Vec<AlignedPoint> {
    let mut known = latest_per_month(points);

    let (Some(start), Some(end)) = (
        known.first().map(|p| MonthKey::from_date(p.date)),
        known.last().map(|p| MonthKey::from_date(p.date)),
    ) else {
        return known;
    };

    let present: HashSet<MonthKey> = known.iter().map(|p| MonthKey::from_date(p.date)).collect();
    let mut month = Some(start);
    let mut filled = Vec::new();

    while let Some(current) = month.filter(|m| *m <= end) {
        if !present.contains(&current) {
            match interpolate_at(&known, current) {
                Some(point) => filled.push(point),
                None => debug!(month = %current, "No neighbours to interpolate from, skipping"),
            }
        }
        month = current.next();
    }

    if !filled.is_empty() {
        debug!(filled = filled.len(), "Interpolated missing months");
    }

    known.extend(filled);
    known.sort_by_key(|p| p.date);
    known
}

fn latest_per_month(points: &[AlignedPoint]) -> Vec<AlignedPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);

    let mut latest: Vec<AlignedPoint> = Vec::with_capacity(sorted.len());
    for point in sorted {
        match latest.last_mut() {
            Some(last) if MonthKey::from_date(last.date) == MonthKey::from_date(point.date) => {
                *last = point
            }
            _ => latest.push(point),
        }
    }
    latest
}

fn interpolate_at(known: &[AlignedPoint], month: MonthKey) -> Option<AlignedPoint> {
    let date = month.first_day();
    let split = known.partition_point(|p| p.date < date);
    let prev = known[..split].last()?;
    let next = known[split..].iter().find(|p| p.date > date)?;

    let span = (next.date - prev.date).num_days() as f64;
    let fraction = (date - prev.date).num_days() as f64 / span;

    Some(AlignedPoint {
        date,
        bitcoin_price: lerp(prev.bitcoin_price, next.bitcoin_price, fraction),
        housing_price: lerp(prev.housing_price, next.housing_price, fraction),
    })
}
