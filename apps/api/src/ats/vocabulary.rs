//! Word lists and tuning knobs injected into the engine at construction.
//!
//! Nothing here is global: the server builds one `Vocabulary` and one
//! `ScoringSettings` at startup, tests build their own.

use serde::{Deserialize, Serialize};

use crate::models::report::Category;

const ACTION_VERBS: &[&str] = &[
    "implemented", "developed", "managed", "led", "created", "designed", "optimized",
    "spearheaded", "orchestrated", "coordinated", "achieved", "launched", "accelerated",
    "administered", "analyzed", "arranged", "authored", "budgeted", "built", "calculated",
    "centralized", "clarified", "collaborated", "composed", "conducted", "consolidated",
    "constructed", "consulted", "controlled", "converted", "counseled", "criticized",
    "cultivated", "customized", "debugged", "decreased", "delegated", "delivered",
    "demonstrated", "depicted", "detailed", "determined", "devised", "directed",
    "discovered", "drafted", "educated", "eliminated", "enabled", "enforced", "engineered",
    "enhanced", "established", "evaluated", "examined", "executed", "expanded", "expedited",
    "explained", "facilitated", "finalized", "focused", "forecasted", "formed", "formulated",
    "fostered", "generated", "guided", "handled", "identified", "illustrated", "improved",
    "increased", "influenced", "informed", "initiated", "inspected", "inspired", "installed",
    "instigated", "instructed", "insured", "integrated", "interpreted", "investigated",
    "itemized",
];

const CLICHES: &[&str] = &[
    "passionate",
    "hardworking",
    "team-player",
    "guru",
    "ninja",
    "motivated",
    "synergy",
    "thought-leader",
];

const IMPACT_NOUNS: &[&str] = &[
    "percent", "dollars", "users", "employees", "clients", "revenue", "profit", "growth",
    "scale", "impact", "saved", "reduced", "increased", "improved",
];

const STOP_WORDS: &[&str] = &[
    "and", "the", "to", "of", "a", "in", "is", "for", "with", "on", "at", "by", "an", "be",
    "this", "that",
];

const UNPROFESSIONAL_FONTS: &[&str] = &["comic", "papyrus", "chiller", "curlz", "joker"];

/// A required resume section and the headings that reveal it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRule {
    pub name: String,
    /// Regex alternatives, matched case-insensitively anywhere in the text.
    pub patterns: Vec<String>,
    pub missing_message: String,
}

impl SectionRule {
    fn new(name: &str, patterns: &[&str], missing_message: &str) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            missing_message: missing_message.to_string(),
        }
    }
}

/// Immutable vocabulary the scorers match against. All entries lower-case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub action_verbs: Vec<String>,
    pub cliches: Vec<String>,
    /// Nouns that turn a bare number into an impact metric ("40 users").
    pub impact_nouns: Vec<String>,
    pub stop_words: Vec<String>,
    /// Substrings that mark a font as unprofessional.
    pub unprofessional_fonts: Vec<String>,
    pub sections: Vec<SectionRule>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            action_verbs: owned(ACTION_VERBS),
            cliches: owned(CLICHES),
            impact_nouns: owned(IMPACT_NOUNS),
            stop_words: owned(STOP_WORDS),
            unprofessional_fonts: owned(UNPROFESSIONAL_FONTS),
            sections: vec![
                SectionRule::new(
                    "Experience",
                    &["experience", "employment", "work history", "background"],
                    "Your professional work history is missing or not clearly labeled.",
                ),
                SectionRule::new(
                    "Education",
                    &["education", "academic", "degree"],
                    "Your academic background couldn't be detected.",
                ),
                SectionRule::new(
                    "Skills",
                    &["skills", "technologies", "expertise", "tools"],
                    "A dedicated 'Skills' section helps highlight your technical toolkit.",
                ),
                SectionRule::new(
                    "Summary",
                    &["summary", "objective", "profile"],
                    "A Professional Summary at the top helps frame your value proposition.",
                ),
            ],
        }
    }
}

/// Category weights for the total score. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub content: f64,
    pub sections: f64,
    pub formatting: f64,
    pub layout: f64,
    pub essentials: f64,
    pub tailoring: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            content: 0.20,
            sections: 0.15,
            formatting: 0.15,
            layout: 0.15,
            essentials: 0.15,
            tailoring: 0.20,
        }
    }
}

impl CategoryWeights {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Content => self.content,
            Category::Sections => self.sections,
            Category::Formatting => self.formatting,
            Category::Layout => self.layout,
            Category::Essentials => self.essentials,
            Category::Tailoring => self.tailoring,
        }
    }
}

/// Numeric heuristics. The density and page-width values are arbitrary
/// heuristics kept tunable rather than derived from document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: CategoryWeights,
    /// Stand-in for a single-column PDF page width, in points.
    pub page_width_estimate: f64,
    /// Lines starting right of `page_width_estimate / column_divisor` count as a second column.
    pub column_divisor: f64,
    pub right_column_ratio: f64,
    pub min_column_samples: usize,
    pub alignment_bucket: f64,
    pub max_alignment_buckets: usize,
    pub small_font_pt: f64,
    pub small_font_ratio: f64,
    pub max_fonts: usize,
    pub density_min_text_len: usize,
    pub density_dense_threshold: f64,
    pub density_sparse_threshold: f64,
    pub min_words: usize,
    pub max_words: usize,
    pub fallback_visual_score: i64,
    pub no_job_description_score: i64,
    pub min_keyword_len: usize,
    pub max_missing_keywords: usize,
    pub preview_chars: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            page_width_estimate: 600.0,
            column_divisor: 2.5,
            right_column_ratio: 0.3,
            min_column_samples: 10,
            alignment_bucket: 10.0,
            max_alignment_buckets: 15,
            small_font_pt: 9.0,
            small_font_ratio: 0.1,
            max_fonts: 2,
            density_min_text_len: 100,
            density_dense_threshold: 80.0,
            density_sparse_threshold: 20.0,
            min_words: 200,
            max_words: 1000,
            fallback_visual_score: 70,
            no_job_description_score: 75,
            min_keyword_len: 3,
            max_missing_keywords: 10,
            preview_chars: 1000,
        }
    }
}
