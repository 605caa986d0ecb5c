//! Tailoring scorer — keyword overlap between the resume and a job description.

use std::collections::BTreeSet;

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::rules::CompiledRules;
use crate::ats::vocabulary::ScoringSettings;
use crate::models::report::{CategoryResult, CheckResult};

const MATCH_PASS_SCORE: f64 = 50.0;
const SOME_MATCH_SCORE: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct TailoringAnalysis {
    pub result: CategoryResult,
    /// Sorted, truncated to `max_missing_keywords`.
    pub missing_keywords: Vec<String>,
    /// False when no usable job description was supplied.
    pub job_description_used: bool,
}

/// Significant job-description words: ASCII alphanumerics only, lower-cased,
/// stop words and short tokens dropped. Sorted for stable output.
pub fn job_keywords(
    job_description: &str,
    rules: &CompiledRules,
    settings: &ScoringSettings,
) -> BTreeSet<String> {
    let cleaned: String = job_description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > settings.min_keyword_len)
        .filter(|w| !rules.stop_words.contains(*w))
        .map(str::to_string)
        .collect()
}

pub fn score_tailoring(
    doc: &NormalizedDocument<'_>,
    job_description: Option<&str>,
    rules: &CompiledRules,
    settings: &ScoringSettings,
) -> TailoringAnalysis {
    let keywords = job_description
        .filter(|jd| !jd.trim().is_empty())
        .map(|jd| job_keywords(jd, rules, settings))
        .unwrap_or_default();

    // Blank JD, or one made only of stop words and short tokens: nothing to measure.
    if keywords.is_empty() {
        return TailoringAnalysis {
            result: CategoryResult::new(
                settings.no_job_description_score,
                vec![CheckResult::pass("Core Relevance", "No JD provided.")],
            ),
            missing_keywords: vec![],
            job_description_used: false,
        };
    }

    let matched = keywords.iter().filter(|k| doc.word_set.contains(*k)).count();
    let raw = matched as f64 / keywords.len() as f64 * 100.0;

    let missing_keywords: Vec<String> = keywords
        .iter()
        .filter(|k| !doc.word_set.contains(*k))
        .take(settings.max_missing_keywords)
        .cloned()
        .collect();

    let message = if raw > SOME_MATCH_SCORE {
        "Integrated some JD keywords."
    } else {
        "Low keyword match with JD."
    };
    let check = CheckResult::pass_or_fail("Job Match", raw >= MATCH_PASS_SCORE, message, message);

    TailoringAnalysis {
        result: CategoryResult::new(raw.round_ties_even() as i64, vec![check]),
        missing_keywords,
        job_description_used: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::vocabulary::Vocabulary;
    use crate::models::report::CheckStatus;

    fn rules() -> CompiledRules {
        CompiledRules::compile(&Vocabulary::default()).unwrap()
    }

    fn analyze(resume: &str, jd: Option<&str>) -> TailoringAnalysis {
        let rules = rules();
        let doc = NormalizedDocument::new(resume, None, &rules.word);
        score_tailoring(&doc, jd, &rules, &ScoringSettings::default())
    }

    #[test]
    fn test_keywords_drop_stop_words_short_tokens_and_punctuation() {
        let kws = job_keywords(
            "Looking for a Python developer with SQL experience!",
            &rules(),
            &ScoringSettings::default(),
        );
        let kws: Vec<&str> = kws.iter().map(String::as_str).collect();
        assert_eq!(kws, ["developer", "experience", "looking", "python"]);
    }

    #[test]
    fn test_non_ascii_letters_are_stripped() {
        let kws = job_keywords("café résumé", &rules(), &ScoringSettings::default());
        let kws: Vec<&str> = kws.iter().map(String::as_str).collect();
        assert_eq!(kws, ["rsum"]);
    }

    #[test]
    fn test_no_job_description_scores_75() {
        let a = analyze("python", None);
        assert_eq!(a.result.score, 75);
        assert_eq!(a.result.checks[0].name, "Core Relevance");
        assert_eq!(a.result.checks[0].status, CheckStatus::Pass);
        assert!(a.missing_keywords.is_empty());
        assert!(!a.job_description_used);
    }

    #[test]
    fn test_blank_job_description_is_ignored() {
        let a = analyze("python", Some("   \n"));
        assert_eq!(a.result.score, 75);
        assert!(!a.job_description_used);
    }

    #[test]
    fn test_stop_word_only_job_description_is_skipped() {
        let a = analyze("python", Some("and the to of a in is for"));
        assert_eq!(a.result.score, 75);
        assert!(!a.job_description_used);
    }

    #[test]
    fn test_partial_match() {
        let a = analyze(
            "Python scripts and dashboards",
            Some("Looking for a Python developer with SQL experience"),
        );
        assert_eq!(a.result.score, 25);
        assert_eq!(a.missing_keywords, ["developer", "experience", "looking"]);
        assert_eq!(a.result.checks[0].status, CheckStatus::Fail);
        assert_eq!(a.result.checks[0].message, "Integrated some JD keywords.");
    }

    #[test]
    fn test_full_match_passes() {
        let a = analyze("Rust and Kubernetes", Some("Rust Kubernetes"));
        assert_eq!(a.result.score, 100);
        assert_eq!(a.result.checks[0].status, CheckStatus::Pass);
        assert!(a.missing_keywords.is_empty());
    }

    #[test]
    fn test_low_match_message() {
        let a = analyze("nothing", Some("kafka spark flink airflow dbt"));
        assert_eq!(a.result.score, 0);
        assert_eq!(a.result.checks[0].message, "Low keyword match with JD.");
    }

    #[test]
    fn test_half_point_match_rounds_to_even() {
        // 1 of 8 keywords = 12.5
        let a = analyze("alpha", Some("alpha bravo charlie delta echo foxtrot golf hotel"));
        assert_eq!(a.result.score, 12);
        assert_eq!(a.missing_keywords.len(), 7);
    }

    #[test]
    fn test_missing_keywords_capped_and_sorted() {
        let jd = "zeta yotta xray whiskey victor uniform tango sierra romeo quebec papa oscar";
        let a = analyze("unrelated", Some(jd));
        assert_eq!(a.missing_keywords.len(), 10);
        let mut sorted = a.missing_keywords.clone();
        sorted.sort();
        assert_eq!(a.missing_keywords, sorted);
        assert_eq!(a.missing_keywords[0], "oscar");
    }
}
