//! Scanner run over a snapshot's canonical text before it is hashed for anchoring.
//!
//! Findings carry only a category. The matched text is never reported, logged or
//! stored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyCategory {
    EmailAddress,
    PhoneNumber,
    PaymentDetails,
}

impl std::fmt::Display for PrivacyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PrivacyCategory::EmailAddress => "email address",
            PrivacyCategory::PhoneNumber => "phone number",
            PrivacyCategory::PaymentDetails => "payment details",
        };
        f.write_str(s)
    }
}

const PAYMENT_TERMS: &[&str] = &[
    "iban",
    "bic",
    "swift code",
    "sort code",
    "routing number",
    "account number",
    "acct no",
    "card number",
    "credit card",
    "debit card",
    "cvv",
    "cvc",
    "paypal",
    "venmo",
    "revolut",
    "zelle",
];

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

/// First category found in `text`, checked in order email, phone, payment vocabulary.
pub fn scan(text: &str) -> Option<PrivacyCategory> {
    if contains_email(text) {
        return Some(PrivacyCategory::EmailAddress);
    }
    if contains_phone_number(text) {
        return Some(PrivacyCategory::PhoneNumber);
    }
    if contains_payment_terms(text) {
        return Some(PrivacyCategory::PaymentDetails);
    }
    None
}

fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "._%+-".contains(c)
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// `local@domain.tld` with a non-empty local part and an alphabetic TLD of 2+ chars.
pub fn contains_email(text: &str) -> bool {
    for (at, _) in text.match_indices('@') {
        let local = text[..at].chars().rev().take_while(|&c| is_local_part_char(c)).count();
        if local == 0 {
            continue;
        }
        let domain: String = text[at + 1..].chars().take_while(|&c| is_domain_char(c)).collect();
        let domain = domain.trim_end_matches(['.', '-']);
        let mut labels = domain.split('.');
        let first = labels.next().unwrap_or_default();
        let tld = domain.rsplit('.').next().unwrap_or_default();
        if !first.is_empty()
            && domain.contains('.')
            && tld.len() >= 2
            && tld.chars().all(|c| c.is_ascii_alphabetic())
        {
            return true;
        }
    }
    false
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || " -()+".contains(c)
}

/// A run of digits and phone punctuation holding 9 to 15 digits that is not glued to a
/// word on either side, directly or through a `.` or `-`. Hex hashes, uuid segments and
/// fractional amounts therefore do not match.
pub fn contains_phone_number(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !is_phone_char(chars[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && is_phone_char(chars[i]) {
            i += 1;
        }
        // Separators at either end belong to the surrounding text, not the number.
        let (mut s, mut e) = (start, i);
        while s < e && !(chars[s].is_ascii_digit() || chars[s] == '+' || chars[s] == '(') {
            s += 1;
        }
        while e > s && !(chars[e - 1].is_ascii_digit() || chars[e - 1] == ')') {
            e -= 1;
        }
        if s == e {
            continue;
        }
        let at = |j: Option<usize>| j.and_then(|j| chars.get(j).copied());
        let glued = |next: Option<char>, beyond: Option<char>| match next {
            Some('.') | Some('-') => beyond.is_some_and(|c| c.is_alphanumeric()),
            Some(c) => c.is_alphanumeric() || c == '_',
            None => false,
        };
        if glued(at(s.checked_sub(1)), at(s.checked_sub(2))) || glued(at(Some(e)), at(Some(e + 1))) {
            continue;
        }
        let digits = chars[s..e].iter().filter(|c| c.is_ascii_digit()).count();
        if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) && !is_year_run(&chars[s..e]) {
            return true;
        }
    }
    false
}

// `2023 2024 2025`
fn is_year_run(run: &[char]) -> bool {
    let text: String = run.iter().collect();
    let groups: Vec<&str> = text.split(' ').filter(|g| !g.is_empty()).collect();
    groups.len() > 1
        && groups.iter().all(|g| {
            g.len() == 4 && (g.starts_with("19") || g.starts_with("20")) && g.chars().all(|c| c.is_ascii_digit())
        })
}

/// Payment vocabulary as whole words, case-insensitive.
pub fn contains_payment_terms(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PAYMENT_TERMS.iter().any(|term| contains_word(&lowered, term))
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(pos, _)| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
