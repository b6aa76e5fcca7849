use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SkillLevel;

static EMAIL_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._-]+").unwrap());
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Trimmed string when non-blank.
pub fn valid_string(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Upper-cases the first character of every whitespace-separated word.
pub fn capitalize_name(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Display name derived from the local part of an e-mail address.
pub fn name_from_email(email: &str) -> Option<String> {
    let local = email.split('@').next()?.trim();
    if local.is_empty() {
        return None;
    }
    let spaced = EMAIL_SEPARATORS.replace_all(&local.to_lowercase(), " ").into_owned();
    let name = capitalize_name(&spaced);
    (!name.is_empty()).then_some(name)
}

/// Localized label for a level code; unknown codes pass through unchanged.
pub fn format_skill_level(code: &str) -> String {
    if code.trim().is_empty() {
        return String::new();
    }
    match SkillLevel::from_code(code) {
        Some(level) => level.label().to_string(),
        None => code.to_string(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

pub fn normalize_email(email: &str) -> Option<String> {
    valid_string(email).map(str::to_lowercase)
}
