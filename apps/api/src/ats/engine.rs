//! ATS engine — normalizes one resume, runs the six category scorers and
//! aggregates them into a `Report`.
//!
//! The engine holds only immutable, pre-compiled rules, so one instance is
//! shared across requests as `Arc<AtsEngine>`.

use tracing::debug;

use crate::ats::aggregator::{improvements, total_score};
use crate::ats::content::score_content;
use crate::ats::essentials::score_essentials;
use crate::ats::formatting::score_formatting;
use crate::ats::layout::score_layout;
use crate::ats::normalizer::{preview, NormalizedDocument};
use crate::ats::rules::CompiledRules;
use crate::ats::sections::score_sections;
use crate::ats::tailoring::score_tailoring;
use crate::ats::vocabulary::{ScoringSettings, Vocabulary};
use crate::models::fragment::TextFragment;
use crate::models::report::{Categories, Report};

#[derive(Debug)]
pub struct AtsEngine {
    vocabulary: Vocabulary,
    settings: ScoringSettings,
    rules: CompiledRules,
}

impl AtsEngine {
    /// Fails only when a vocabulary-supplied section pattern is not a valid regex.
    pub fn new(vocabulary: Vocabulary, settings: ScoringSettings) -> Result<Self, regex::Error> {
        let rules = CompiledRules::compile(&vocabulary)?;
        Ok(Self {
            vocabulary,
            settings,
            rules,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Scores one resume. Pure: identical inputs always yield an identical report,
    /// and missing or malformed inputs degrade to neutral default scores.
    pub fn score(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
        structure: Option<&[TextFragment]>,
    ) -> Report {
        let doc = NormalizedDocument::new(resume_text, structure, &self.rules.word);

        let content = score_content(&doc, &self.rules);
        let tailoring = score_tailoring(&doc, job_description, &self.rules, &self.settings);

        let categories = Categories {
            content: content.result.clone(),
            sections: score_sections(&doc, &self.rules),
            formatting: score_formatting(&doc, &self.rules, &self.settings),
            layout: score_layout(&doc, &self.settings),
            essentials: score_essentials(&doc, &self.rules, &self.settings),
            tailoring: tailoring.result.clone(),
        };

        let total = total_score(&categories, &self.settings.weights);
        let improvements = improvements(&categories, &content, &tailoring);

        debug!(
            total_score = total,
            words = doc.word_count(),
            cliches = content.unique_cliches,
            fragments = doc.fragments.map_or(0, <[TextFragment]>::len),
            job_description = tailoring.job_description_used,
            "Scored resume"
        );

        Report {
            total_score: total,
            categories,
            missing_keywords: tailoring.missing_keywords,
            improvements,
            parsed_text_preview: preview(resume_text, self.settings.preview_chars),
        }
    }
}
