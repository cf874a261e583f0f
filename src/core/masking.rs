//! Sensitive-data masking engine
//!
//! Rules match field *names* (never values) with a case-insensitive pattern
//! and rewrite string values with a masking strategy. The rule list is
//! append-only: `add_rule` swaps in a new immutable snapshot, so readers
//! always iterate a complete, consistent list and no API can weaken an
//! existing rule. Every pattern is vetted against catastrophic-backtracking
//! shapes before it is accepted.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use super::error::{LoggerError, Result};
use super::log_value::{FieldMap, LogValue};

/// Caller-supplied masking function for the `Custom` strategy
pub type MaskFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a matched field's value is rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskStrategy {
    CreditCard,
    Ssn,
    Email,
    Phone,
    Password,
    Token,
    Custom,
    /// Fallback strategy: mask the full length (preserved) or up to 8 chars
    #[default]
    Generic,
}

/// Uncompiled rule description.
///
/// The pure-data subset deserializes from configuration; `custom` can only
/// be attached in code.
#[derive(Clone, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    #[serde(default)]
    pub strategy: MaskStrategy,
    #[serde(default)]
    pub preserve_length: bool,
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
    #[serde(skip)]
    pub custom: Option<MaskFn>,
}

fn default_mask_char() -> char {
    '*'
}

impl RuleSpec {
    pub fn new(pattern: impl Into<String>, strategy: MaskStrategy) -> Self {
        Self {
            pattern: pattern.into(),
            strategy,
            preserve_length: false,
            mask_char: '*',
            custom: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn preserve_length(mut self, preserve: bool) -> Self {
        self.preserve_length = preserve;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn mask_char(mut self, ch: char) -> Self {
        self.mask_char = ch;
        self
    }

    /// Attach a custom masking function (implies the `Custom` strategy)
    #[must_use = "builder methods return a new value"]
    pub fn custom_fn(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.strategy = MaskStrategy::Custom;
        self.custom = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSpec")
            .field("pattern", &self.pattern)
            .field("strategy", &self.strategy)
            .field("preserve_length", &self.preserve_length)
            .field("mask_char", &self.mask_char)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A compiled, immutable masking rule
#[derive(Clone)]
pub struct MaskingRule {
    pattern: Regex,
    strategy: MaskStrategy,
    preserve_length: bool,
    mask_char: char,
    custom: Option<MaskFn>,
}

impl MaskingRule {
    /// True when this rule governs the given field name
    #[must_use]
    pub fn matches(&self, field_name: &str) -> bool {
        self.pattern.is_match(field_name)
    }

    #[must_use]
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Apply this rule's strategy to a string value
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        let ch = self.mask_char;
        match self.strategy {
            MaskStrategy::CreditCard => mask_credit_card(value, self.preserve_length, ch),
            MaskStrategy::Ssn => mask_ssn(value, self.preserve_length, ch),
            MaskStrategy::Email => mask_email(value, self.preserve_length, ch),
            MaskStrategy::Phone => mask_phone(value, self.preserve_length, ch),
            MaskStrategy::Password => mask_fill(ch, value.chars().count()),
            MaskStrategy::Token => mask_token(value, self.preserve_length, ch),
            MaskStrategy::Custom => match &self.custom {
                Some(f) => f(value),
                None => mask_generic(value, self.preserve_length, ch),
            },
            MaskStrategy::Generic => mask_generic(value, self.preserve_length, ch),
        }
    }
}

impl fmt::Debug for MaskingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskingRule")
            .field("pattern", &self.pattern.as_str())
            .field("strategy", &self.strategy)
            .field("preserve_length", &self.preserve_length)
            .field("mask_char", &self.mask_char)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn mask_fill(ch: char, count: usize) -> String {
    ch.to_string().repeat(count)
}

fn last_digits(value: &str, count: usize) -> String {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(count);
    digits[start..].iter().collect()
}

/// Replace every digit except the trailing `keep_last` in place, leaving
/// separators untouched
fn mask_digits_in_place(value: &str, keep_last: usize, ch: char) -> String {
    let total = value.chars().filter(char::is_ascii_digit).count();
    let cutoff = total.saturating_sub(keep_last);
    let mut seen = 0usize;
    value
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen <= cutoff {
                    ch
                } else {
                    c
                }
            } else {
                c
            }
        })
        .collect()
}

fn mask_credit_card(value: &str, preserve_length: bool, ch: char) -> String {
    if preserve_length {
        mask_digits_in_place(value, 4, ch)
    } else {
        let group = mask_fill(ch, 4);
        format!("{group}-{group}-{group}-{}", last_digits(value, 4))
    }
}

fn mask_ssn(value: &str, preserve_length: bool, ch: char) -> String {
    if preserve_length {
        mask_digits_in_place(value, 4, ch)
    } else {
        format!(
            "{}-{}-{}",
            mask_fill(ch, 3),
            mask_fill(ch, 2),
            last_digits(value, 4)
        )
    }
}

fn mask_phone(value: &str, preserve_length: bool, ch: char) -> String {
    if preserve_length {
        mask_digits_in_place(value, 4, ch)
    } else {
        let group = mask_fill(ch, 3);
        format!("{group}-{group}-{}", last_digits(value, 4))
    }
}

fn mask_email(value: &str, preserve_length: bool, ch: char) -> String {
    if value.is_empty() {
        return String::new();
    }
    let (local, domain) = match value.split_once('@') {
        Some((local, domain)) => (local, Some(domain)),
        None => (value, None),
    };
    let mut first = local.chars().take(1).collect::<String>();
    let masked_len = if preserve_length {
        local.chars().count().saturating_sub(1)
    } else {
        3
    };
    first.push_str(&mask_fill(ch, masked_len));
    match domain {
        Some(domain) => format!("{first}@{domain}"),
        None => first,
    }
}

fn mask_token(value: &str, preserve_length: bool, ch: char) -> String {
    let len = value.chars().count();
    if preserve_length {
        if len > 9 {
            let head: String = value.chars().take(4).collect();
            let tail: String = value.chars().skip(len - 5).collect();
            format!("{head}{}{tail}", mask_fill(ch, len - 9))
        } else {
            mask_fill(ch, len)
        }
    } else if len > 8 {
        let head: String = value.chars().take(4).collect();
        let tail: String = value.chars().skip(len - 5).collect();
        format!("{head}...{tail}")
    } else {
        mask_fill(ch, len)
    }
}

fn mask_generic(value: &str, preserve_length: bool, ch: char) -> String {
    let len = value.chars().count();
    if preserve_length {
        mask_fill(ch, len)
    } else {
        mask_fill(ch, len.min(8))
    }
}

lazy_static! {
    /// A group containing a quantifier, itself quantified: `(a+)+`, `(\d*)*`
    static ref NESTED_QUANTIFIER: Regex =
        Regex::new(r"\([^()]*[+*][^()]*\)\s*[+*{]").expect("static pattern");
    /// Adjacent quantifiers: `a++`, `a**`, `a+*`
    static ref QUANT_ON_QUANT: Regex = Regex::new(r"[+*][+*]").expect("static pattern");
    /// A quantified group holding an alternation, for overlap inspection
    static ref QUANTIFIED_ALTERNATION: Regex =
        Regex::new(r"\(([^()]*\|[^()]*)\)\s*[+*{]").expect("static pattern");
    /// Brace quantifier applied to a brace quantifier: `a{2,}{3,}`
    static ref BRACE_ON_BRACE: Regex = Regex::new(r"\{\d+,?\d*\}\s*\{").expect("static pattern");
}

/// Pattern safety strategy, selected at configuration time
pub trait PatternValidator: Send + Sync {
    /// Validator name used in rejection errors
    fn name(&self) -> &'static str;

    /// Check a candidate pattern; `Err` carries the rejection reason
    fn validate(&self, pattern: &str) -> std::result::Result<(), String>;
}

/// Shape heuristics for known exponential-backtracking constructs
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicValidator;

impl HeuristicValidator {
    fn check_shapes(pattern: &str) -> std::result::Result<(), String> {
        if NESTED_QUANTIFIER.is_match(pattern) {
            return Err("nested quantifier".to_string());
        }
        if QUANT_ON_QUANT.is_match(pattern) {
            return Err("quantifier on quantifier".to_string());
        }
        if BRACE_ON_BRACE.is_match(pattern) {
            return Err("quantifier on quantifier".to_string());
        }
        for caps in QUANTIFIED_ALTERNATION.captures_iter(pattern) {
            let inner = &caps[1];
            if alternation_branches_overlap(inner) {
                return Err("overlapping alternation under repetition".to_string());
            }
        }
        Ok(())
    }
}

/// True when two branches of an alternation begin with the same character,
/// the shape behind patterns like `(a|ab)+`
fn alternation_branches_overlap(inner: &str) -> bool {
    let heads: Vec<Option<char>> = inner
        .split('|')
        .map(|branch| branch.chars().next())
        .collect();
    for (i, a) in heads.iter().enumerate() {
        for b in heads.iter().skip(i + 1) {
            if a.is_some() && a == b {
                return true;
            }
        }
    }
    false
}

impl PatternValidator for HeuristicValidator {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn validate(&self, pattern: &str) -> std::result::Result<(), String> {
        Self::check_shapes(pattern)
    }
}

/// Heuristics plus hard complexity caps
#[derive(Debug, Clone, Copy)]
pub struct StrictValidator {
    pub max_pattern_len: usize,
    pub max_quantifiers: usize,
}

impl Default for StrictValidator {
    fn default() -> Self {
        Self {
            max_pattern_len: 256,
            max_quantifiers: 10,
        }
    }
}

impl PatternValidator for StrictValidator {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn validate(&self, pattern: &str) -> std::result::Result<(), String> {
        if pattern.len() > self.max_pattern_len {
            return Err(format!(
                "pattern length {} exceeds limit {}",
                pattern.len(),
                self.max_pattern_len
            ));
        }
        let quantifiers = pattern
            .chars()
            .filter(|c| matches!(c, '+' | '*' | '{'))
            .count();
        if quantifiers > self.max_quantifiers {
            return Err(format!(
                "{} quantifiers exceed limit {}",
                quantifiers, self.max_quantifiers
            ));
        }
        HeuristicValidator::check_shapes(pattern)
    }
}

/// Validator selection for pure-data configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    #[default]
    Heuristic,
    Strict,
}

impl ValidatorKind {
    #[must_use]
    pub fn build(self) -> Box<dyn PatternValidator> {
        match self {
            ValidatorKind::Heuristic => Box::new(HeuristicValidator),
            ValidatorKind::Strict => Box::new(StrictValidator::default()),
        }
    }
}

/// Field-name patterns for the built-in rule set
#[must_use]
pub fn default_rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(r"credit.?card|card.?number|\bpan\b", MaskStrategy::CreditCard),
        RuleSpec::new(r"\bssn\b|social.?security", MaskStrategy::Ssn),
        RuleSpec::new(r"e[-_]?mail", MaskStrategy::Email),
        RuleSpec::new(r"phone|mobile|msisdn", MaskStrategy::Phone),
        RuleSpec::new(r"password|passwd|\bpwd\b", MaskStrategy::Password),
        RuleSpec::new(r"token|api.?key|authorization|\bjwt\b", MaskStrategy::Token),
    ]
}

/// The masking engine: an append-only list of compiled rules.
///
/// `process` walks plain objects and arrays; the first rule (insertion
/// order) whose pattern matches a string field's name applies its strategy.
/// Any internal failure returns the input unchanged, since logging must
/// never abort the host application.
pub struct MaskingEngine {
    rules: RwLock<Arc<Vec<MaskingRule>>>,
    validator: Box<dyn PatternValidator>,
}

impl MaskingEngine {
    /// Engine pre-loaded with the default rule set
    #[must_use]
    pub fn new() -> Self {
        let engine = Self::empty();
        for spec in default_rules() {
            // Default patterns are static and pass validation
            if let Err(e) = engine.add_rule(spec) {
                debug_assert!(false, "default rule rejected: {e}");
            }
        }
        engine
    }

    /// Engine with no rules installed
    #[must_use]
    pub fn empty() -> Self {
        Self::with_validator(Box::new(HeuristicValidator))
    }

    #[must_use]
    pub fn with_validator(validator: Box<dyn PatternValidator>) -> Self {
        Self {
            rules: RwLock::new(Arc::new(Vec::new())),
            validator,
        }
    }

    /// Validate, compile, and append a rule.
    ///
    /// Never replaces or removes an existing rule; readers observe either
    /// the old snapshot or the new one, never a partial list.
    pub fn add_rule(&self, spec: RuleSpec) -> Result<()> {
        self.validator
            .validate(&spec.pattern)
            .map_err(|reason| {
                LoggerError::unsafe_pattern(&spec.pattern, self.validator.name(), reason)
            })?;

        if spec.strategy == MaskStrategy::Custom && spec.custom.is_none() {
            return Err(LoggerError::config(
                "MaskingEngine",
                format!(
                    "rule '{}' uses the custom strategy without a custom function",
                    spec.pattern
                ),
            ));
        }

        let pattern = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| LoggerError::invalid_pattern(&spec.pattern, e.to_string()))?;

        let rule = MaskingRule {
            pattern,
            strategy: spec.strategy,
            preserve_length: spec.preserve_length,
            mask_char: spec.mask_char,
            custom: spec.custom,
        };

        let mut guard = self.rules.write();
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(rule);
        *guard = Arc::new(next);
        Ok(())
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.read().len()
    }

    /// Mask a value tree; fail-open on any internal failure
    #[must_use]
    pub fn process(&self, value: &LogValue) -> LogValue {
        let rules = Arc::clone(&self.rules.read());
        if rules.is_empty() {
            return value.clone();
        }
        match catch_unwind(AssertUnwindSafe(|| mask_value(&rules, None, value))) {
            Ok(masked) => masked,
            Err(_) => value.clone(),
        }
    }

    /// Mask a field map; fail-open on any internal failure
    #[must_use]
    pub fn process_fields(&self, fields: &FieldMap) -> FieldMap {
        match self.process(&LogValue::Object(fields.clone())) {
            LogValue::Object(map) => map,
            _ => fields.clone(),
        }
    }
}

impl Default for MaskingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MaskingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskingEngine")
            .field("rules", &self.rules.read().len())
            .field("validator", &self.validator.name())
            .finish()
    }
}

fn mask_value(rules: &[MaskingRule], field_name: Option<&str>, value: &LogValue) -> LogValue {
    match value {
        LogValue::Object(map) => LogValue::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), mask_value(rules, Some(key), item)))
                .collect(),
        ),
        // Array elements inherit the enclosing field name
        LogValue::Array(items) => LogValue::Array(
            items
                .iter()
                .map(|item| mask_value(rules, field_name, item))
                .collect(),
        ),
        LogValue::String(s) => match field_name
            .and_then(|name| rules.iter().find(|rule| rule.matches(name)))
        {
            Some(rule) => LogValue::String(rule.apply(s)),
            None => value.clone(),
        },
        other => other.clone(),
    }
}
