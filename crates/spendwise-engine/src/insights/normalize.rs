//! Description cleanup pipelines.
//!
//! Each pipeline is a fixed sequence of small pure stages so any stage can be
//! tested on its own.

use std::sync::OnceLock;

use regex::Regex;

use crate::insights::policy::{NORMALIZE_POLICY_V1, NormalizePolicy};

const TRANSFER_STOP_WORDS: [&str; 10] = [
    "transfer", "to", "from", "commbank", "app", "internet", "banking", "bank", "online", "mobile",
];

/// Cleaned, tail-biased key used for rule matching on non-transfer rows.
pub fn categorization_key(description: &str) -> String {
    categorization_key_with_policy(description, NORMALIZE_POLICY_V1)
}

pub(crate) fn categorization_key_with_policy(description: &str, policy: NormalizePolicy) -> String {
    let lowered = description.trim().to_lowercase();
    let cleaned = strip_payment_prefix(&lowered);
    let cleaned = remove_masked_accounts(&cleaned);
    let cleaned = remove_noise_tokens(&cleaned);
    let cleaned = keep_letters(&cleaned);
    let words = split_words(&cleaned);
    tail_words(&words, policy.key_tail_words)
}

/// Trailing payee/purpose phrase of a templated transfer description.
pub fn transfer_reason(description: &str) -> String {
    transfer_reason_with_policy(description, NORMALIZE_POLICY_V1)
}

pub(crate) fn transfer_reason_with_policy(description: &str, policy: NormalizePolicy) -> String {
    let lowered = description.trim().to_lowercase();
    let cleaned = remove_masked_accounts(&lowered);
    let cleaned = remove_long_numbers(&cleaned);
    let cleaned = keep_letters(&cleaned);
    let words = split_words(&cleaned)
        .into_iter()
        .filter(|word| !TRANSFER_STOP_WORDS.contains(word))
        .collect::<Vec<&str>>();
    tail_words(&words, policy.reason_tail_words)
}

/// Short title-cased merchant label used to group rows for cadence detection.
/// Head-biased and coarser than [`categorization_key`] so minor description
/// variants of one merchant land in the same group.
pub fn normalize_merchant(description: &str) -> String {
    normalize_merchant_with_policy(description, NORMALIZE_POLICY_V1)
}

pub(crate) fn normalize_merchant_with_policy(description: &str, policy: NormalizePolicy) -> String {
    let cleaned = strip_payment_prefix(description.trim());
    let cleaned = remove_masked_accounts(&cleaned);
    let cleaned = remove_noise_tokens(&cleaned);
    let cleaned = keep_letters(&cleaned);
    let words = split_words(&cleaned);
    if words.is_empty() {
        return "Unknown".to_string();
    }
    words
        .iter()
        .take(policy.merchant_head_words)
        .map(|word| title_case(word))
        .collect::<Vec<String>>()
        .join(" ")
}

pub(crate) fn strip_payment_prefix(value: &str) -> String {
    payment_prefix_regex().replace(value, "").into_owned()
}

pub(crate) fn remove_masked_accounts(value: &str) -> String {
    masked_account_regex().replace_all(value, " ").into_owned()
}

pub(crate) fn remove_long_numbers(value: &str) -> String {
    long_number_regex().replace_all(value, " ").into_owned()
}

pub(crate) fn remove_noise_tokens(value: &str) -> String {
    noise_token_regex().replace_all(value, " ").into_owned()
}

/// Replaces every character that is not an ASCII letter or whitespace.
pub(crate) fn keep_letters(value: &str) -> String {
    value
        .chars()
        .map(|character| {
            if character.is_ascii_alphabetic() || character.is_whitespace() {
                character
            } else {
                ' '
            }
        })
        .collect()
}

fn split_words(value: &str) -> Vec<&str> {
    value.split_whitespace().collect()
}

fn tail_words(words: &[&str], limit: usize) -> String {
    let start = words.len().saturating_sub(limit);
    words[start..].join(" ")
}

fn title_case(word: &str) -> String {
    let mut characters = word.chars();
    match characters.next() {
        Some(first) => first
            .to_uppercase()
            .chain(characters.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn payment_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(direct debit|bpay|visa purchase|eftpos|dbs\*)\s+")
            .expect("invalid payment prefix regex")
    })
}

fn masked_account_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bxx\d+\b").expect("invalid masked account regex"))
}

fn long_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{4,}\b").expect("invalid long number regex"))
}

fn noise_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(\d[\d\-\.]*|pty|ltd|au|nz|us|ca|gb|sg|hk|nsw|vic|qld|sa|wa|tas|nt|act|card|value|date)\b",
        )
        .expect("invalid noise token regex")
    })
}
