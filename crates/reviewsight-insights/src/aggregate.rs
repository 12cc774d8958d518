//! Per-segment theme tallies.

use reviewsight_core::{AnalyzedReview, Theme};

use crate::types::{Segment, ThemeTally};

/// Tally the themes of `reviews` that fall in `segment`. Returns `None` for
/// an empty segment.
pub fn tally(reviews: &[&AnalyzedReview], segment: Segment) -> Option<ThemeTally> {
    let mut population = 0;
    let mut counts: Vec<(Theme, usize)> = Vec::new();

    for item in reviews.iter().filter(|r| segment.contains(&r.review)) {
        population += 1;
        if !item.theme.is_reportable() {
            continue;
        }
        match counts.iter_mut().find(|(t, _)| *t == item.theme) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.theme, 1)),
        }
    }

    if population == 0 {
        return None;
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Some(ThemeTally {
        segment,
        population,
        counts,
    })
}

/// Tallies for every non-empty segment, in [`Segment::all`] order.
pub fn aggregate(reviews: &[&AnalyzedReview]) -> Vec<ThemeTally> {
    Segment::all()
        .iter()
        .filter_map(|s| tally(reviews, *s))
        .collect()
}
