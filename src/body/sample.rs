//! Hit-location queries: weight ratios and weighted-random part selection,
//! used by combat and targeting logic.
//!
//! A part's weight is its share of the body's surface; weight-0 parts (a
//! held grip, an earring slot) can never be struck. The optional filter is a
//! comma-separated list of part names, matched case-insensitively.

use rand::Rng;

use crate::body::Body;

/// Does `name` match the optional comma-separated name filter? An absent or
/// blank filter matches everything.
fn matches_filter(filter: Option<&str>, name: &str) -> bool {
    match filter {
        None => true,
        Some(list) if list.trim().is_empty() => true,
        Some(list) => list
            .split(',')
            .map(str::trim)
            .any(|keyword| !keyword.is_empty() && keyword.eq_ignore_ascii_case(name)),
    }
}

/// Fraction of the body's total weight held by parts matching `filter`.
/// A body with no weight at all yields 0 rather than dividing by zero.
pub fn part_ratio(body: &Body, filter: Option<&str>) -> f64 {
    let mut matched = 0.0;
    let mut total = 0.0;
    for part in body.parts() {
        let weight = f64::from(part.weight());
        total += weight;
        if matches_filter(filter, part.name()) {
            matched += weight;
        }
    }
    if total == 0.0 {
        0.0
    } else {
        matched / total
    }
}

/// Weighted-random draw over the parts matching `filter`. Each eligible
/// part's chance is proportional to its weight; weight-0 parts are never
/// drawn. Returns `None` when the filtered weight sum is zero.
///
/// Draws a uniform roll in `[1, total]` and walks the parts subtracting
/// weight until the roll is spent.
pub fn random_part<'a>(body: &'a Body, filter: Option<&str>, rng: &mut impl Rng) -> Option<&'a str> {
    let total: u64 = body
        .parts()
        .filter(|part| matches_filter(filter, part.name()))
        .map(|part| u64::from(part.weight()))
        .sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(1..=total) as i64;
    for part in body.parts() {
        if !matches_filter(filter, part.name()) {
            continue;
        }
        roll -= i64::from(part.weight());
        if roll <= 0 {
            return Some(part.name());
        }
    }
    None
}
