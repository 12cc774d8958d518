//! Drivers and pain points from the segment tallies.

use reviewsight_core::{AnalyzedReview, Insight, InsightSet};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::types::{Segment, ThemeTally};

/// Themes taken from the sentiment segments.
pub const SENTIMENT_TOP_N: usize = 3;
/// Themes taken from the rating segments.
pub const RATING_TOP_N: usize = 2;

/// Rank drivers and pain points for `bank`, or for the whole corpus when
/// `bank` is `None`.
///
/// Pain points are seeded from negative sentiment and topped up from low
/// ratings; drivers from positive sentiment and high ratings. A theme is
/// listed at most once per list but may appear in both.
pub fn identify_drivers_and_pain_points(
    reviews: &[AnalyzedReview],
    bank: Option<&str>,
) -> InsightSet {
    let scoped: Vec<&AnalyzedReview> = reviews
        .iter()
        .filter(|r| bank.map_or(true, |b| r.review.bank == b))
        .collect();

    let tallies = aggregate(&scoped);
    let segment = |s: Segment| tallies.iter().find(|t| t.segment == s);

    let mut set = InsightSet::default();
    extend(
        &mut set.pain_points,
        segment(Segment::NegativeSentiment),
        SENTIMENT_TOP_N,
    );
    extend(
        &mut set.drivers,
        segment(Segment::PositiveSentiment),
        SENTIMENT_TOP_N,
    );
    extend(&mut set.pain_points, segment(Segment::LowRating), RATING_TOP_N);
    extend(&mut set.drivers, segment(Segment::HighRating), RATING_TOP_N);

    debug!(
        "Insights for {}: {} drivers, {} pain points",
        bank.unwrap_or("all banks"),
        set.drivers.len(),
        set.pain_points.len()
    );
    set
}

fn extend(list: &mut Vec<Insight>, tally: Option<&ThemeTally>, top_n: usize) {
    let Some(tally) = tally else {
        return;
    };
    for &(theme, count) in tally.counts.iter().take(top_n) {
        if list.iter().any(|i| i.theme == theme) {
            continue;
        }
        list.push(Insight {
            theme,
            count,
            percentage: count as f64 / tally.population as f64 * 100.0,
        });
    }
}
