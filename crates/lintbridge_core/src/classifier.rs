//! Severity classification from message text.
//!
//! The tools we wrap do not report a structured severity, so the level is
//! guessed from the wording of each message.

use regex::Regex;

use crate::diagnostic::Severity;
use crate::error::ConfigError;

/// Default keyword that marks a message as an error.
pub const DEFAULT_ERROR_KEYWORD: &str = "error";

/// Assigns a severity to a report message.
pub trait SeverityClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Severity;
}

impl<F> SeverityClassifier for F
where
    F: Fn(&str) -> Severity + Send + Sync,
{
    fn classify(&self, message: &str) -> Severity {
        self(message)
    }
}

/// Classifies as error when the message contains a keyword (case-sensitive).
///
/// Empty messages are errors. Everything else is a warning.
#[derive(Debug, Clone)]
pub struct SubstringClassifier {
    keyword: String,
}

impl SubstringClassifier {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Default for SubstringClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_KEYWORD)
    }
}

impl SeverityClassifier for SubstringClassifier {
    fn classify(&self, message: &str) -> Severity {
        if !message.is_empty() && !message.contains(self.keyword.as_str()) {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// One entry of a [`RuleTableClassifier`].
#[derive(Debug, Clone)]
pub struct SeverityRule {
    pattern: Regex,
    severity: Severity,
}

impl SeverityRule {
    /// Compiles a rule from a regular expression.
    pub fn new(pattern: &str, severity: Severity) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: regex,
            severity,
        })
    }

    pub fn matches(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }
}

/// Ordered rule table; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct RuleTableClassifier {
    rules: Vec<SeverityRule>,
    fallback: Severity,
}

impl RuleTableClassifier {
    pub fn new(rules: Vec<SeverityRule>, fallback: Severity) -> Self {
        Self { rules, fallback }
    }
}

impl SeverityClassifier for RuleTableClassifier {
    fn classify(&self, message: &str) -> Severity {
        if message.is_empty() {
            return Severity::Error;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(message))
            .map(|rule| rule.severity)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::keyword_at_start("error: undeclared signal", Severity::Error)]
    #[case::keyword_inside("syntax error at token", Severity::Error)]
    #[case::keyword_in_word("preerrored", Severity::Error)]
    #[case::no_keyword("unused variable", Severity::Warning)]
    #[case::capitalized_keyword("Error: x", Severity::Warning)]
    #[case::empty_message("", Severity::Error)]
    fn test_substring_classifier(#[case] message: &str, #[case] expected: Severity) {
        assert_eq!(SubstringClassifier::default().classify(message), expected);
    }

    #[test]
    fn test_custom_keyword() {
        let classifier = SubstringClassifier::new("FATAL");
        assert_eq!(classifier.classify("FATAL: no module"), Severity::Error);
        assert_eq!(classifier.classify("error: lowercase"), Severity::Warning);
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |message: &str| {
            if message.starts_with('E') {
                Severity::Error
            } else {
                Severity::Warning
            }
        };
        assert_eq!(classifier.classify("E100 bad"), Severity::Error);
        assert_eq!(classifier.classify("W200 meh"), Severity::Warning);
    }

    #[test]
    fn test_rule_table_first_match_wins() {
        let classifier = RuleTableClassifier::new(
            vec![
                SeverityRule::new(r"\[Style: ", Severity::Warning).unwrap(),
                SeverityRule::new(r"(?i)error", Severity::Error).unwrap(),
            ],
            Severity::Warning,
        );

        assert_eq!(
            classifier.classify("line too long [Style: line-length] error"),
            Severity::Warning
        );
        assert_eq!(classifier.classify("Syntax Error"), Severity::Error);
        assert_eq!(classifier.classify("something else"), Severity::Warning);
        assert_eq!(classifier.classify(""), Severity::Error);
    }

    #[test]
    fn test_invalid_rule_pattern() {
        let err = SeverityRule::new("(unclosed", Severity::Error).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
