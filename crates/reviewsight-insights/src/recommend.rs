//! Fixed mapping from insight themes to recommendations.

use reviewsight_core::{InsightSet, Priority, Recommendation};

/// Pain-point rules, checked in order against the theme label; first match
/// wins.
const PAIN_POINT_RULES: &[(&[&str], &str, &str, Priority)] = &[
    (
        &["Account Access"],
        "Account Access",
        "Improve login process and authentication mechanisms. Consider implementing biometric authentication and password recovery options.",
        Priority::High,
    ),
    (
        &["Transaction Performance"],
        "Performance",
        "Optimize transaction processing speed. Investigate server response times and implement caching strategies.",
        Priority::High,
    ),
    (
        &["User Interface", "Experience"],
        "UX/UI",
        "Redesign user interface for better usability. Conduct user testing and implement modern design patterns.",
        Priority::Medium,
    ),
    (
        &["Customer Support"],
        "Support",
        "Enhance customer support channels. Consider implementing AI chatbot for faster response times.",
        Priority::High,
    ),
    (
        &["Reliability"],
        "Stability",
        "Fix app crashes and stability issues. Implement comprehensive error handling and testing.",
        Priority::Critical,
    ),
];

const DRIVER_RULES: &[(&[&str], &str, &str, Priority)] = &[(
    &["Transaction Performance"],
    "Enhancement",
    "Leverage fast transaction processing as a competitive advantage. Market this feature prominently.",
    Priority::Low,
)];

/// Recommendations for pain points (in order) followed by drivers. Themes
/// without a rule are skipped; nothing is deduplicated.
pub fn generate_recommendations(insights: &InsightSet) -> Vec<Recommendation> {
    let pain = insights
        .pain_points
        .iter()
        .filter_map(|i| lookup(PAIN_POINT_RULES, i.theme.label()));
    let drivers = insights
        .drivers
        .iter()
        .filter_map(|i| lookup(DRIVER_RULES, i.theme.label()));
    pain.chain(drivers).collect()
}

fn lookup(
    rules: &[(&[&str], &str, &str, Priority)],
    theme: &str,
) -> Option<Recommendation> {
    rules
        .iter()
        .find(|(needles, ..)| needles.iter().any(|n| theme.contains(n)))
        .map(|(_, category, text, priority)| Recommendation {
            category: category.to_string(),
            text: text.to_string(),
            priority: *priority,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewsight_core::{Insight, Theme};

    fn insight(theme: Theme) -> Insight {
        Insight {
            theme,
            count: 1,
            percentage: 50.0,
        }
    }

    #[test]
    fn test_pain_points_then_drivers() {
        let set = InsightSet {
            drivers: vec![insight(Theme::TransactionPerformance)],
            pain_points: vec![insight(Theme::AccountAccess)],
        };
        let recs = generate_recommendations(&set);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, "Account Access");
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].category, "Enhancement");
        assert_eq!(recs[1].priority, Priority::Low);
    }

    #[test]
    fn test_every_pain_point_theme_mapping() {
        let cases = [
            (Theme::AccountAccess, Some(("Account Access", Priority::High))),
            (Theme::TransactionPerformance, Some(("Performance", Priority::High))),
            (Theme::UserInterface, Some(("UX/UI", Priority::Medium))),
            (Theme::CustomerSupport, Some(("Support", Priority::High))),
            (Theme::AppReliability, Some(("Stability", Priority::Critical))),
            (Theme::FeatureRequests, None),
            (Theme::SecurityPrivacy, None),
        ];
        for (theme, expected) in cases {
            let set = InsightSet {
                drivers: vec![],
                pain_points: vec![insight(theme)],
            };
            let recs = generate_recommendations(&set);
            match expected {
                Some((category, priority)) => {
                    assert_eq!(recs.len(), 1, "{}", theme);
                    assert_eq!(recs[0].category, category);
                    assert_eq!(recs[0].priority, priority);
                }
                None => assert!(recs.is_empty(), "{}", theme),
            }
        }
    }

    #[test]
    fn test_only_performance_driver_maps() {
        let set = InsightSet {
            drivers: vec![insight(Theme::UserInterface), insight(Theme::CustomerSupport)],
            pain_points: vec![],
        };
        assert!(generate_recommendations(&set).is_empty());
    }

    #[test]
    fn test_no_dedup_across_lists() {
        let set = InsightSet {
            drivers: vec![insight(Theme::TransactionPerformance)],
            pain_points: vec![insight(Theme::TransactionPerformance)],
        };
        let recs = generate_recommendations(&set);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].category, "Performance");
        assert_eq!(recs[1].category, "Enhancement");
        assert!(generate_recommendations(&InsightSet::default()).is_empty());
    }
}
