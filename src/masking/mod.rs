use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed placeholder used for full redaction and unusable partial patterns.
/// Input length is deliberately not reflected in the output.
pub const MASK_PLACEHOLDER: &str = "*****";

/// Per-column masking rule in its wire shape:
/// `{"type": "MASK_ALL"}` or `{"type": "PARTIAL", "pattern": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaskingRule {
    #[serde(rename = "MASK_ALL")]
    MaskAll,
    #[serde(rename = "PARTIAL")]
    Partial { pattern: String },
}

/// Column name -> masking rule, keyed per endpoint.
pub type ColumnMaskingConfig = BTreeMap<String, MaskingRule>;

/// Masking behavior decided once at rule-creation time, instead of
/// re-sniffing the pattern string on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskingStrategy {
    /// Fixed placeholder, regardless of input.
    Redact,
    /// Keep the first `n` characters, star the rest one-for-one.
    ShowFirst(usize),
    /// Keep the last `n` characters, star the prefix.
    ShowLast(usize),
    /// Mask the local part of an email-shaped value, keep the domain.
    Email,
    /// The pattern itself is the display template, returned verbatim.
    Literal(String),
}

impl MaskingStrategy {
    /// Parse the wire pattern convention into a strategy.
    ///
    /// Recognized forms: `ShowFirst<N>`, `ShowLast<N>`, an email placeholder
    /// whose local part is entirely `*` (e.g. `***@***.com`), and anything
    /// else as a literal template. Blank or malformed numeric patterns
    /// degrade to full redaction.
    pub fn parse(pattern: &str) -> Self {
        if pattern.trim().is_empty() {
            return MaskingStrategy::Redact;
        }

        if let Some(n) = pattern.strip_prefix("ShowFirst") {
            return match n.parse::<usize>() {
                Ok(count) => MaskingStrategy::ShowFirst(count),
                Err(_) => MaskingStrategy::Redact,
            };
        }
        if let Some(n) = pattern.strip_prefix("ShowLast") {
            return match n.parse::<usize>() {
                Ok(count) => MaskingStrategy::ShowLast(count),
                Err(_) => MaskingStrategy::Redact,
            };
        }
        if Self::is_email_placeholder(pattern) {
            return MaskingStrategy::Email;
        }

        MaskingStrategy::Literal(pattern.to_string())
    }

    // A pattern is an email placeholder only when its own local part is
    // entirely stars; a pattern with concrete characters before the `@`
    // (e.g. `j****e@****.com`) is a literal template.
    fn is_email_placeholder(pattern: &str) -> bool {
        match pattern.find('@') {
            Some(at) if at > 0 => pattern[..at].chars().all(|c| c == '*'),
            _ => false,
        }
    }
}

impl MaskingRule {
    pub fn strategy(&self) -> MaskingStrategy {
        match self {
            MaskingRule::MaskAll => MaskingStrategy::Redact,
            MaskingRule::Partial { pattern } => MaskingStrategy::parse(pattern),
        }
    }
}

/// Derive the display-safe value for a raw sample under a rule.
///
/// Referentially transparent; cheap enough to run per keystroke while the
/// user edits masking rules.
pub fn mask(value: &str, rule: &MaskingRule) -> String {
    apply(value, &rule.strategy())
}

/// Same as [`mask`], against a column config: columns without a rule pass
/// through unmasked.
pub fn mask_column(value: &str, column: &str, config: &ColumnMaskingConfig) -> String {
    match config.get(column) {
        Some(rule) => mask(value, rule),
        None => value.to_string(),
    }
}

pub fn apply(value: &str, strategy: &MaskingStrategy) -> String {
    match strategy {
        MaskingStrategy::Redact => MASK_PLACEHOLDER.to_string(),
        MaskingStrategy::ShowFirst(n) => show_first(value, *n),
        MaskingStrategy::ShowLast(n) => show_last(value, *n),
        MaskingStrategy::Email => mask_email(value),
        MaskingStrategy::Literal(template) => template.clone(),
    }
}

fn show_first(value: &str, count: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= count {
        return value.to_string();
    }
    let kept: String = chars[..count].iter().collect();
    format!("{}{}", kept, "*".repeat(chars.len() - count))
}

fn show_last(value: &str, count: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= count {
        return value.to_string();
    }
    let kept: String = chars[chars.len() - count..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - count), kept)
}

fn mask_email(value: &str) -> String {
    let at = match value.find('@') {
        Some(idx) if idx > 0 => idx,
        _ => return MASK_PLACEHOLDER.to_string(),
    };
    let local = &value[..at];
    let domain = &value[at + 1..];

    let local_chars: Vec<char> = local.chars().collect();
    if local_chars.len() > 2 {
        format!(
            "{}****{}@{}",
            local_chars[0],
            local_chars[local_chars.len() - 1],
            domain
        )
    } else {
        format!("****@{}", domain)
    }
}
