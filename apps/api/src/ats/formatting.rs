//! Formatting scorer — readable sizes, professional fonts, few font families.

use std::collections::BTreeSet;

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::rules::CompiledRules;
use crate::ats::vocabulary::ScoringSettings;
use crate::models::report::{CategoryResult, CheckResult};

const SMALL_TEXT_PENALTY: i64 = 20;
const BAD_FONT_PENALTY: i64 = 30;
const FONT_COUNT_PENALTY: i64 = 15;

pub fn score_formatting(
    doc: &NormalizedDocument<'_>,
    rules: &CompiledRules,
    settings: &ScoringSettings,
) -> CategoryResult {
    let Some(fragments) = doc.fragments else {
        return CategoryResult::new(
            settings.fallback_visual_score,
            vec![CheckResult::warn(
                "Visual Data",
                "Detailed styling data could not be extracted.",
            )],
        );
    };

    let mut score = 100i64;
    let mut checks = Vec::new();

    let sizes: Vec<f64> = fragments.iter().filter_map(|f| f.known_font_size()).collect();
    if !sizes.is_empty() {
        let small = sizes.iter().filter(|s| **s < settings.small_font_pt).count();
        if small as f64 / sizes.len() as f64 > settings.small_font_ratio {
            score -= SMALL_TEXT_PENALTY;
            checks.push(CheckResult::fail(
                "Font Size",
                format!(
                    "Some of your text is too small (below {}pt). This can make it hard for recruiters to read.",
                    settings.small_font_pt
                ),
            ));
        } else {
            checks.push(CheckResult::pass(
                "Font Size",
                "Font sizes are consistently readable.",
            ));
        }
    }

    // Sorted so the named offender is stable across calls.
    let fonts: BTreeSet<String> = fragments
        .iter()
        .filter_map(|f| f.known_font_name())
        .map(str::to_lowercase)
        .collect();

    let offending = fonts.iter().find(|font| {
        rules
            .unprofessional_fonts
            .iter()
            .any(|bad| font.contains(bad.as_str()))
    });
    match offending {
        Some(font) => {
            score -= BAD_FONT_PENALTY;
            checks.push(CheckResult::fail(
                "Font Choice",
                format!(
                    "Avoid using unprofessional fonts like \"{font}\". Stick to cleaner fonts like Arial, Calibri, or Inter."
                ),
            ));
        }
        None => checks.push(CheckResult::pass(
            "Font Choice",
            "Professional font choices detected.",
        )),
    }

    if fonts.len() > settings.max_fonts {
        score -= FONT_COUNT_PENALTY;
        checks.push(CheckResult::warn(
            "Font Consistency",
            format!(
                "You are using {} different fonts. Using more than {} fonts can make the layout look cluttered.",
                fonts.len(),
                settings.max_fonts
            ),
        ));
    } else {
        checks.push(CheckResult::pass("Font Consistency", "Good font consistency."));
    }

    CategoryResult::new(score, checks)
}
