//! Compiled form of a `Vocabulary`: lookup sets and regexes, built once per engine.

use std::collections::HashSet;

use regex::Regex;

use crate::ats::vocabulary::Vocabulary;

const WORD_PATTERN: &str = r"\w+";
const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+";
const PHONE_PATTERN: &str = r"\+?[\d\s\-.()]{10,18}";
const SOCIAL_PATTERN: &str = r"(?i)(?:linkedin\.com/in/|github\.com/|portfolio|behance\.net)";

#[derive(Debug)]
pub struct SectionMatcher {
    pub name: String,
    pub pattern: Regex,
    pub missing_message: String,
}

#[derive(Debug)]
pub struct CompiledRules {
    pub word: Regex,
    pub impact_metric: Regex,
    pub email: Regex,
    pub phone: Regex,
    pub social: Regex,
    pub action_verbs: HashSet<String>,
    pub cliches: HashSet<String>,
    pub stop_words: HashSet<String>,
    pub unprofessional_fonts: Vec<String>,
    pub sections: Vec<SectionMatcher>,
}

impl CompiledRules {
    pub fn compile(vocabulary: &Vocabulary) -> Result<Self, regex::Error> {
        let sections = vocabulary
            .sections
            .iter()
            .map(|rule| {
                Ok(SectionMatcher {
                    name: rule.name.clone(),
                    pattern: Regex::new(&alternation(&rule.patterns))?,
                    missing_message: rule.missing_message.clone(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            word: Regex::new(WORD_PATTERN)?,
            impact_metric: Regex::new(&impact_metric_pattern(&vocabulary.impact_nouns))?,
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
            social: Regex::new(SOCIAL_PATTERN)?,
            action_verbs: lowercase_set(&vocabulary.action_verbs),
            cliches: lowercase_set(&vocabulary.cliches),
            stop_words: lowercase_set(&vocabulary.stop_words),
            unprofessional_fonts: vocabulary
                .unprofessional_fonts
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
            sections,
        })
    }
}

fn lowercase_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Case-insensitive "any of these" regex. An empty list never matches.
fn alternation(patterns: &[String]) -> String {
    if patterns.is_empty() {
        return r"\b\B".to_string();
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?i){joined}")
}

/// `40%`, `$500`, or a number followed by one of the impact nouns.
fn impact_metric_pattern(nouns: &[String]) -> String {
    let mut pattern = String::from(r"(?i)\d+%|\$\d+");
    if !nouns.is_empty() {
        let nouns = nouns
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        pattern.push_str(&format!(r"|[0-9]+\s*(?:{nouns})"));
    }
    pattern
}
