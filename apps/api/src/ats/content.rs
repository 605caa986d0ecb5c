//! Content scorer — action verbs, quantified impact, cliché penalty.

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::rules::CompiledRules;
use crate::models::report::{CategoryResult, CheckResult};

const VERBS_PASS_SCORE: i64 = 70;
const IMPACT_PASS_SCORE: i64 = 60;
const POINTS_PER_VERB: i64 = 10;
const POINTS_PER_METRIC: i64 = 20;
const PENALTY_PER_CLICHE: i64 = 5;

/// Content result plus the sub-scores the aggregator's tips are built from.
#[derive(Debug, Clone)]
pub struct ContentAnalysis {
    pub result: CategoryResult,
    pub unique_verbs: usize,
    pub verbs_score: i64,
    pub metrics_found: usize,
    pub impact_score: i64,
    pub unique_cliches: usize,
}

pub fn score_content(doc: &NormalizedDocument<'_>, rules: &CompiledRules) -> ContentAnalysis {
    let unique_verbs = doc
        .word_set
        .iter()
        .filter(|w| rules.action_verbs.contains(*w))
        .count();
    let verbs_score = (unique_verbs as i64 * POINTS_PER_VERB).min(100);

    let metrics_found = rules.impact_metric.find_iter(doc.text).count();
    let impact_score = (metrics_found as i64 * POINTS_PER_METRIC).min(100);

    let unique_cliches = doc
        .word_set
        .iter()
        .filter(|w| rules.cliches.contains(*w))
        .count();
    let cliche_penalty = unique_cliches as i64 * PENALTY_PER_CLICHE;

    let raw = verbs_score as f64 * 0.6 + impact_score as f64 * 0.4 - cliche_penalty as f64;
    let score = raw.max(0.0).round_ties_even() as i64;

    let checks = vec![
        CheckResult::pass_or_fail(
            "Action Verbs",
            verbs_score >= VERBS_PASS_SCORE,
            format!("Great use of {unique_verbs} unique action verbs!"),
            format!(
                "Found {unique_verbs} unique action verbs. Try adding more leadership words like \"Spearheaded\" or \"Accelerated\"."
            ),
        ),
        CheckResult::pass_or_fail(
            "Impact Metrics",
            impact_score >= IMPACT_PASS_SCORE,
            format!("Excellent job quantifying your impact with {metrics_found} metrics."),
            format!(
                "Found only {metrics_found} quantifiable results. Prove your impact with percentages (%) or numbers."
            ),
        ),
    ];

    ContentAnalysis {
        result: CategoryResult::new(score, checks),
        unique_verbs,
        verbs_score,
        metrics_found,
        impact_score,
        unique_cliches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::vocabulary::Vocabulary;
    use crate::models::report::CheckStatus;

    fn analyze(text: &str) -> ContentAnalysis {
        let rules = CompiledRules::compile(&Vocabulary::default()).unwrap();
        let doc = NormalizedDocument::new(text, None, &rules.word);
        score_content(&doc, &rules)
    }

    #[test]
    fn test_three_verbs_one_metric() {
        let a = analyze("Developed and implemented a new system, increased revenue by 20%");
        // "increased" counts as a verb; "20%" is the only metric.
        assert_eq!(a.unique_verbs, 3);
        assert_eq!(a.verbs_score, 30);
        assert_eq!(a.metrics_found, 1);
        assert_eq!(a.impact_score, 20);
        assert_eq!(a.result.score, 26);
    }

    #[test]
    fn test_repeated_verbs_count_once() {
        let a = analyze("Led design. Led delivery. Led hiring.");
        assert_eq!(a.unique_verbs, 1);
        assert_eq!(a.verbs_score, 10);
    }

    #[test]
    fn test_verb_score_caps_at_100() {
        let a = analyze(
            "implemented developed managed led created designed optimized spearheaded \
             orchestrated coordinated achieved launched",
        );
        assert_eq!(a.verbs_score, 100);
        assert_eq!(a.result.checks[0].status, CheckStatus::Pass);
    }

    #[test]
    fn test_impact_score_caps_at_100() {
        let a = analyze("10% 20% 30% 40% 50% 60% $7");
        assert_eq!(a.metrics_found, 7);
        assert_eq!(a.impact_score, 100);
        assert_eq!(a.result.checks[1].status, CheckStatus::Pass);
        assert!(a.result.checks[1].message.contains("7 metrics"));
    }

    #[test]
    fn test_cliche_penalty_never_goes_negative() {
        let a = analyze("Passionate hardworking motivated guru ninja with synergy");
        assert_eq!(a.unique_cliches, 6);
        assert_eq!(a.result.score, 0);
    }

    #[test]
    fn test_cliche_penalty_subtracts() {
        // 3 verbs (30 * 0.6 = 18) + 1 metric (20 * 0.4 = 8) - 5
        let a = analyze("Led, built and launched a passionate 40% turnaround");
        assert_eq!(a.result.score, 21);
    }

    #[test]
    fn test_failing_checks_interpolate_counts() {
        let a = analyze("Nothing measurable here");
        assert_eq!(a.result.checks[0].name, "Action Verbs");
        assert_eq!(a.result.checks[0].status, CheckStatus::Fail);
        assert!(a.result.checks[0].message.starts_with("Found 0 unique action verbs"));
        assert_eq!(a.result.checks[1].status, CheckStatus::Fail);
        assert!(a.result.checks[1].message.contains("Found only 0"));
    }
}
