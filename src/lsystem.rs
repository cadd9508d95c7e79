//! String-rewriting core: rule sets and the lazy generation sequence.
//!
//! A [`RuleSet`] maps uppercase keys to replacement strings. [`Lindenmayer`] walks
//! the generations of an axiom under those rules, one generation per call to
//! [`Iterator::next`], and never terminates.
//!
//! # Expansion
//!
//! Within one step every rule is applied once, in insertion order, as a plain
//! substring replacement. Replacement text is inserted lower-cased so that a
//! later rule in the same step cannot match it; the whole string is upper-cased
//! once all rules have run. Keys are therefore restricted to uppercase letters.

use crate::error::{FractalError, Result};
use log::debug;
use serde::{Deserialize, Serialize};

/// A single `key -> replacement` rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub key: String,
    pub replacement: String,
}

/// An ordered, validated collection of rewrite rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Builds a rule set from `(key, replacement)` pairs, keeping their order.
    ///
    /// Fails with [`FractalError::InvalidRuleKey`] on the first key that is not a
    /// non-empty run of ASCII uppercase letters.
    pub fn new<I, K, V>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::default();
        for (key, replacement) in rules {
            set.push(key, replacement)?;
        }
        Ok(set)
    }

    /// Appends a rule. A key that is already present is replaced in place so that
    /// its position in the application order does not change.
    pub fn push(&mut self, key: impl Into<String>, replacement: impl Into<String>) -> Result<()> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(FractalError::InvalidRuleKey(key));
        }
        let replacement = replacement.into();
        match self.rules.iter_mut().find(|r| r.key == key) {
            Some(rule) => rule.replacement = replacement,
            None => self.rules.push(Rule { key, replacement }),
        }
        Ok(())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules; expansion is then the identity.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Computes the generation that follows `current`.
    pub fn expand(&self, current: &str) -> String {
        self.rules
            .iter()
            .fold(current.to_owned(), |acc, rule| {
                acc.replace(&rule.key, &rule.replacement.to_lowercase())
            })
            .to_uppercase()
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rules = Vec::<Rule>::deserialize(deserializer)?;
        RuleSet::new(rules.into_iter().map(|r| (r.key, r.replacement)))
            .map_err(serde::de::Error::custom)
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_uppercase())
}

/// The infinite sequence of generations of an L-System.
///
/// Element 0 is the axiom. The next generation is only computed when it is
/// pulled, so holding a `Lindenmayer` costs one string. There is no way to
/// rewind; build a new one to start over.
#[derive(Clone, Debug)]
pub struct Lindenmayer {
    rules: RuleSet,
    current: String,
    generation: usize,
    started: bool,
}

impl Lindenmayer {
    /// Starts a sequence whose first element is `axiom`.
    pub fn new(axiom: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            rules,
            current: axiom.into(),
            generation: 0,
            started: false,
        }
    }

    /// The rules driving the expansion.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Iterator for Lindenmayer {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.started {
            self.current = self.rules.expand(&self.current);
            self.generation += 1;
            debug!(
                "expanded generation {} ({} symbols)",
                self.generation,
                self.current.len()
            );
        }
        self.started = true;
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Starts the generation sequence for `axiom` under `rules`.
pub fn generate(axiom: impl Into<String>, rules: RuleSet) -> Lindenmayer {
    Lindenmayer::new(axiom, rules)
}
