//! Weighted total score and the prioritized improvement list.

use std::collections::HashSet;

use crate::ats::content::ContentAnalysis;
use crate::ats::tailoring::TailoringAnalysis;
use crate::ats::vocabulary::CategoryWeights;
use crate::models::report::{Categories, CheckStatus};

const TIP_THRESHOLD: i64 = 90;
const JD_TIP_THRESHOLD: u32 = 85;
const JD_TIP_KEYWORDS: usize = 3;

/// Weighted sum of category scores, rounded and clamped into 0..=100.
pub fn total_score(categories: &Categories, weights: &CategoryWeights) -> u32 {
    let total: f64 = categories
        .iter()
        .map(|(category, result)| f64::from(result.score) * weights.weight(category))
        .sum();
    total.round_ties_even().clamp(0.0, 100.0) as u32
}

/// Fails first, then warnings, then contextual tips. Stable de-duplication.
pub fn improvements(
    categories: &Categories,
    content: &ContentAnalysis,
    tailoring: &TailoringAnalysis,
) -> Vec<String> {
    let mut out = Vec::new();

    for wanted in [CheckStatus::Fail, CheckStatus::Warn] {
        out.extend(
            categories
                .iter()
                .flat_map(|(_, result)| result.checks.iter())
                .filter(|check| check.status == wanted)
                .map(|check| check.message.clone()),
        );
    }

    if i64::from(categories.content.score) < TIP_THRESHOLD {
        if content.verbs_score < TIP_THRESHOLD {
            out.push(format!(
                "Strength Tip: Your resume uses {} action verbs. For a top-tier resume, aim for 15+ unique leadership verbs.",
                content.unique_verbs
            ));
        }
        if content.impact_score < TIP_THRESHOLD {
            out.push(format!(
                "Result Tip: We found {} metrics. Try to quantify at least 5-7 achievements with numbers or % to prove your value.",
                content.metrics_found
            ));
        }
    }

    if tailoring.job_description_used && categories.tailoring.score < JD_TIP_THRESHOLD {
        let top_missing = tailoring
            .missing_keywords
            .iter()
            .take(JD_TIP_KEYWORDS)
            .map(|k| format!("\"{}\"", capitalize(k)))
            .collect::<Vec<_>>()
            .join(", ");
        out.push(format!(
            "JD Match: You're missing key skills like {top_missing} mentioned in the job description."
        ));
    }

    dedup_stable(out)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn dedup_stable(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
