//! Checks that the required resume headings are present.

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::rules::CompiledRules;
use crate::models::report::{CategoryResult, CheckResult};

pub fn score_sections(doc: &NormalizedDocument<'_>, rules: &CompiledRules) -> CategoryResult {
    if rules.sections.is_empty() {
        return CategoryResult::new(100, vec![]);
    }

    let mut found = 0usize;
    let mut checks = Vec::with_capacity(rules.sections.len());

    for section in &rules.sections {
        let present = section.pattern.is_match(doc.text);
        if present {
            found += 1;
        }
        checks.push(CheckResult::pass_or_fail(
            format!("{} Section", section.name),
            present,
            format!("Found your {} section.", section.name),
            section.missing_message.clone(),
        ));
    }

    let score = (found as f64 / rules.sections.len() as f64 * 100.0).round_ties_even() as i64;
    CategoryResult::new(score, checks)
}
