//! # Categorizer
//!
//! Keyword rule engine assigning one [`Category`] to each repository.
//!
//! The rule table is an ordered list of (category label, keywords). The text
//! `name + " " + description` is lowercased and the rules are evaluated top
//! to bottom; the first rule with any keyword contained in the text wins.
//! The outcome depends only on the text and the table, never on map
//! iteration order.
//!
//! Labels are plain strings so a table can come from configuration. A label
//! outside the enumerated set is replaced by the fallback category and the
//! classification is flagged (`fell_back`) for the caller to warn about.

use crate::Category;
use serde::{Deserialize, Serialize};

// =============================================================================
// RULE TABLE
// =============================================================================

/// One row of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category display label.
    #[serde(rename = "name")]
    pub label: String,
    /// Substrings to look for. An empty keyword always matches.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Create a rule. Keywords are lowercased to match the folded text.
    #[must_use]
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// Ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    /// Build a table from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|r| CategoryRule::new(r.label, r.keywords))
                .collect(),
        }
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Label of the first rule matching `text`, if any.
    fn first_match(&self, text: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(|rule| rule.label.as_str())
    }
}

impl Default for RuleTable {
    /// The built-in table. Order follows [`Category::ALL`]; `Uncategorized`
    /// carries the empty keyword and catches everything else.
    fn default() -> Self {
        let keywords = |category: Category| -> &'static [&'static str] {
            match category {
                Category::Bots => &["bot", "discord"],
                Category::Dashboards => &["dashboard"],
                Category::BotTemplates => &["template"],
                Category::DeveloperTools => &["cli", "tool", "sdk"],
                Category::Libraries => &["api", "wrapper", "library", "framework"],
                Category::WebsiteTemplates => &["website", "web", "landing", "template"],
                Category::DiscoverySites => &["discover", "directory", "listing"],
                Category::Platforms => &["platform", "service"],
                Category::Solutions => &["solution", "help", "support"],
                Category::Uncategorized => &[""],
            }
        };
        Self::new(
            Category::ALL
                .into_iter()
                .map(|c| CategoryRule::new(c.label(), keywords(c)))
                .collect(),
        )
    }
}

// =============================================================================
// CATEGORIZER
// =============================================================================

/// What happens when classification is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisabledBehavior {
    /// Every record gets the fallback category; keywords are not consulted.
    #[default]
    Fallback,
    /// Keyword matching still runs.
    Keywords,
}

/// Result of classifying one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Set when the matched rule named a label outside the enumerated set
    /// and the fallback category was substituted.
    pub fell_back: bool,
}

/// Deterministic keyword classifier.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: RuleTable,
    fallback: Category,
    enabled: bool,
    when_disabled: DisabledBehavior,
}

impl Categorizer {
    /// Create a categorizer over a rule table.
    #[must_use]
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules,
            fallback: Category::Uncategorized,
            enabled: true,
            when_disabled: DisabledBehavior::default(),
        }
    }

    /// Set the fallback category.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Category) -> Self {
        self.fallback = fallback;
        self
    }

    /// Enable or disable classification.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Choose the behavior used while classification is disabled.
    #[must_use]
    pub fn when_disabled(mut self, behavior: DisabledBehavior) -> Self {
        self.when_disabled = behavior;
        self
    }

    /// The fallback category.
    #[must_use]
    pub fn fallback(&self) -> Category {
        self.fallback
    }

    /// Classify a repository by name and description.
    #[must_use]
    pub fn classify(&self, name: &str, description: &str) -> Classification {
        if !self.enabled && self.when_disabled == DisabledBehavior::Fallback {
            return Classification {
                category: self.fallback,
                fell_back: false,
            };
        }

        let text = format!("{} {}", name, description).to_lowercase();
        match self.rules.first_match(&text) {
            None => Classification {
                category: self.fallback,
                fell_back: false,
            },
            Some(label) => match Category::from_label(label) {
                Some(category) => Classification {
                    category,
                    fell_back: false,
                },
                None => Classification {
                    category: self.fallback,
                    fell_back: true,
                },
            },
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(RuleTable::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bots_win_over_templates() {
        let c = Categorizer::default();
        assert_eq!(
            c.classify("discord-bot-template", "").category,
            Category::Bots
        );
    }

    #[test]
    fn description_participates() {
        let c = Categorizer::default();
        assert_eq!(
            c.classify("starlight", "An admin Dashboard for servers").category,
            Category::Dashboards
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = Categorizer::default();
        assert_eq!(c.classify("Awesome-SDK", "").category, Category::DeveloperTools);
    }

    #[test]
    fn no_keyword_falls_to_catch_all() {
        let c = Categorizer::default();
        let result = c.classify("zzz", "quux");
        assert_eq!(result.category, Category::Uncategorized);
        assert!(!result.fell_back);
    }

    #[test]
    fn template_without_bot_is_bot_template() {
        let c = Categorizer::default();
        assert_eq!(c.classify("starter-template", "").category, Category::BotTemplates);
    }

    #[test]
    fn unknown_label_falls_back() {
        let table = RuleTable::new(vec![CategoryRule::new("Games", ["game"])]);
        let c = Categorizer::new(table).with_fallback(Category::Solutions);
        let result = c.classify("space-game", "");
        assert_eq!(result.category, Category::Solutions);
        assert!(result.fell_back);
    }

    #[test]
    fn table_without_catch_all_uses_fallback() {
        let table = RuleTable::new(vec![CategoryRule::new("Bots", ["bot"])]);
        let c = Categorizer::new(table).with_fallback(Category::Platforms);
        assert_eq!(c.classify("website", "").category, Category::Platforms);
    }

    #[test]
    fn configured_keywords_are_folded() {
        let table = RuleTable::new(vec![CategoryRule::new("Libraries", ["SDK"])]);
        let c = Categorizer::new(table);
        assert_eq!(c.classify("rust-sdk", "").category, Category::Libraries);
    }

    #[test]
    fn disabled_fallback_skips_keywords() {
        let c = Categorizer::default()
            .enabled(false)
            .with_fallback(Category::Solutions);
        assert_eq!(c.classify("my-bot", "").category, Category::Solutions);
    }

    #[test]
    fn disabled_keywords_still_match() {
        let c = Categorizer::default()
            .enabled(false)
            .when_disabled(DisabledBehavior::Keywords);
        assert_eq!(c.classify("my-bot", "").category, Category::Bots);
    }

    #[test]
    fn default_table_follows_priority_order() {
        let table = RuleTable::default();
        let labels: Vec<&str> = table.rules().iter().map(|r| r.label.as_str()).collect();
        let expected: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, expected);
    }
}
