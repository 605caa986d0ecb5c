//! Essentials scorer: contact details and overall length.

use regex::Regex;

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::rules::CompiledRules;
use crate::ats::vocabulary::ScoringSettings;
use crate::models::report::{CategoryResult, CheckResult, CheckStatus};

const CONTACT_WEIGHT: f64 = 70.0;
const LENGTH_FULL_POINTS: f64 = 30.0;
const LENGTH_PARTIAL_POINTS: f64 = 15.0;

pub fn score_essentials(
    doc: &NormalizedDocument<'_>,
    rules: &CompiledRules,
    settings: &ScoringSettings,
) -> CategoryResult {
    let contacts: [(&str, &Regex, &str); 3] = [
        ("Email", &rules.email, "Provide a valid email address."),
        ("Phone", &rules.phone, "Include a professional phone number."),
        ("Socials", &rules.social, "Add your LinkedIn or Portfolio link."),
    ];

    let mut checks = Vec::with_capacity(contacts.len() + 1);
    let mut found = 0usize;
    for (label, pattern, help) in contacts {
        let present = pattern.is_match(doc.text);
        if present {
            found += 1;
        }
        checks.push(CheckResult::pass_or_fail(
            label,
            present,
            format!("{label} detected."),
            help,
        ));
    }

    let word_count = doc.word_count();
    let length_status = if word_count < settings.min_words {
        CheckStatus::Fail
    } else if word_count > settings.max_words {
        CheckStatus::Warn
    } else {
        CheckStatus::Pass
    };
    let length_message = match length_status {
        CheckStatus::Pass => format!("{word_count} words is a good length."),
        _ => "Your resume is too short or too long.".to_string(),
    };
    checks.push(CheckResult::new("Length", length_status, length_message));

    let length_points = if length_status == CheckStatus::Pass {
        LENGTH_FULL_POINTS
    } else {
        LENGTH_PARTIAL_POINTS
    };
    let score = (found as f64 / contacts.len() as f64 * CONTACT_WEIGHT + length_points).round_ties_even();

    CategoryResult::new(score as i64, checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::vocabulary::Vocabulary;

    fn score(text: &str) -> CategoryResult {
        let rules = CompiledRules::compile(&Vocabulary::default()).unwrap();
        let doc = NormalizedDocument::new(text, None, &rules.word);
        score_essentials(&doc, &rules, &ScoringSettings::default())
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_exactly_200_words_passes_length() {
        let r = score(&words(200));
        let length = r.checks.iter().find(|c| c.name == "Length").unwrap();
        assert_eq!(length.status, CheckStatus::Pass);
        assert_eq!(length.message, "200 words is a good length.");
    }

    #[test]
    fn test_short_resume_fails_length() {
        let r = score(&words(199));
        assert_eq!(r.checks[3].status, CheckStatus::Fail);
    }

    #[test]
    fn test_long_resume_warns_length() {
        let r = score(&words(1001));
        assert_eq!(r.checks[3].status, CheckStatus::Warn);
        assert_eq!(r.checks[3].message, "Your resume is too short or too long.");
    }

    #[test]
    fn test_all_contacts_and_good_length_score_100() {
        let text = format!(
            "jane@example.com +1 555 123 4567 linkedin.com/in/jane {}",
            words(250)
        );
        let r = score(&text);
        assert_eq!(r.score, 100);
        assert_eq!(r.checks[0].message, "Email detected.");
    }

    #[test]
    fn test_one_contact_short_resume() {
        // 1/3 * 70 + 15 = 38.33
        let r = score("github.com/jane");
        assert_eq!(r.score, 38);
        assert_eq!(r.checks[0].status, CheckStatus::Fail);
        assert_eq!(r.checks[0].message, "Provide a valid email address.");
        assert_eq!(r.checks[2].status, CheckStatus::Pass);
    }

    #[test]
    fn test_nothing_found_scores_15() {
        assert_eq!(score("Jane").score, 15);
    }
}
