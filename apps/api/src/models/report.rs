use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warn,
}

/// A single pass/fail/warn observation attached to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }

    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, message)
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Fail, message)
    }

    pub fn warn(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warn, message)
    }

    /// `Pass` when the condition holds, `Fail` otherwise.
    pub fn pass_or_fail(
        name: impl Into<String>,
        passed: bool,
        pass_message: impl Into<String>,
        fail_message: impl Into<String>,
    ) -> Self {
        if passed {
            Self::pass(name, pass_message)
        } else {
            Self::fail(name, fail_message)
        }
    }
}

/// Score (0 – 100) and ordered checks for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub score: u32,
    pub checks: Vec<CheckResult>,
}

impl CategoryResult {
    /// Builds a result, clamping the raw score into 0..=100.
    pub fn new(score: i64, checks: Vec<CheckResult>) -> Self {
        Self {
            score: score.clamp(0, 100) as u32,
            checks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Content,
    Sections,
    Formatting,
    Layout,
    Essentials,
    Tailoring,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Category; 6] = [
        Category::Content,
        Category::Sections,
        Category::Formatting,
        Category::Layout,
        Category::Essentials,
        Category::Tailoring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Sections => "sections",
            Category::Formatting => "formatting",
            Category::Layout => "layout",
            Category::Essentials => "essentials",
            Category::Tailoring => "tailoring",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six category results. Serializes as a `name -> result` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    pub content: CategoryResult,
    pub sections: CategoryResult,
    pub formatting: CategoryResult,
    pub layout: CategoryResult,
    pub essentials: CategoryResult,
    pub tailoring: CategoryResult,
}

impl Categories {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Content => &self.content,
            Category::Sections => &self.sections,
            Category::Formatting => &self.formatting,
            Category::Layout => &self.layout,
            Category::Essentials => &self.essentials,
            Category::Tailoring => &self.tailoring,
        }
    }

    /// Iterates in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Full ATS report returned to callers. Built once per scoring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub total_score: u32,
    pub categories: Categories,
    pub missing_keywords: Vec<String>,
    pub improvements: Vec<String>,
    pub parsed_text_preview: String,
}
