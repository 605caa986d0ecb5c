//! Layout scorer. Column detection, alignment consistency, text density.

use std::collections::HashSet;

use crate::ats::normalizer::NormalizedDocument;
use crate::ats::vocabulary::ScoringSettings;
use crate::models::report::{CategoryResult, CheckResult};

const COLUMN_PENALTY: i64 = 40;
const ALIGNMENT_PENALTY: i64 = 15;
const DENSITY_PENALTY: i64 = 10;

pub fn score_layout(doc: &NormalizedDocument<'_>, settings: &ScoringSettings) -> CategoryResult {
    let Some(fragments) = doc.fragments else {
        return CategoryResult::new(
            settings.fallback_visual_score,
            vec![CheckResult::warn(
                "Structural Data",
                "Layout analysis limited for this file type.",
            )],
        );
    };

    let mut score = 100i64;
    let mut checks = Vec::new();

    let xs: Vec<f64> = fragments.iter().filter_map(|f| f.known_x()).collect();

    if xs.len() > settings.min_column_samples {
        let boundary = settings.page_width_estimate / settings.column_divisor;
        let right_side = xs.iter().filter(|x| **x > boundary).count();
        if right_side as f64 / xs.len() as f64 > settings.right_column_ratio {
            score -= COLUMN_PENALTY;
            checks.push(CheckResult::fail(
                "Page Layout",
                "Double-column layout detected. ATS systems often struggle with columns; single-column is safer.",
            ));
        } else {
            checks.push(CheckResult::pass(
                "Page Layout",
                "Single-column layout detected, which is ideal for ATS.",
            ));
        }
    }

    if !xs.is_empty() {
        let buckets: HashSet<i64> = xs
            .iter()
            .map(|x| (x / settings.alignment_bucket).round_ties_even() as i64)
            .collect();
        if buckets.len() > settings.max_alignment_buckets {
            score -= ALIGNMENT_PENALTY;
            checks.push(CheckResult::warn(
                "Alignment",
                "Your text alignments seem inconsistent. A clean, left-aligned structure is more professional.",
            ));
        } else {
            checks.push(CheckResult::pass(
                "Alignment",
                "Good, consistent text alignment.",
            ));
        }
    }

    if doc.char_len > settings.density_min_text_len {
        let density = doc.char_len as f64 / fragments.len() as f64;
        if density > settings.density_dense_threshold {
            score -= DENSITY_PENALTY;
            checks.push(CheckResult::warn(
                "Density",
                "Your text blocks look very dense. Try adding more bullet points or whitespace between sections.",
            ));
        } else if density < settings.density_sparse_threshold {
            score -= DENSITY_PENALTY;
            checks.push(CheckResult::warn(
                "Density",
                "Your resume looks a bit sparse. Try expanding on your achievements with more detail.",
            ));
        }
    }

    CategoryResult::new(score, checks)
}
