use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// One pattern-rewrite step. The replacement may reference capture groups
/// with `${n}` syntax. A rule that does not match leaves its input untouched.
#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Regex,
    replacement: String,
}

impl Rule {
    pub fn new(pattern: &str, replacement: &str, case_insensitive: bool) -> Result<Self, Error> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            matcher,
            replacement: replacement.to_string(),
        })
    }

    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.matcher.replace_all(input, self.replacement.as_str())
    }
}

/// An ordered list of rules. Each rule's output feeds the next.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, input: &str) -> String {
        let mut value = input.to_string();
        for rule in &self.rules {
            value = rule.apply(&value).into_owned();
        }
        value
    }
}
