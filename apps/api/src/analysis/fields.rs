//! Field extraction. Pulls e-mail, phone, name and known skills out of raw
//! résumé text with fixed pattern rules.
//!
//! Confidences are per-rule constants, not evidence strength. Both the
//! constants and the skill vocabulary are injectable so alternate tables can
//! be used without changing the rules.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{ExtractedField, ExtractedSkill, ResumeFields};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

// Optional 2-digit area code, optionally in parentheses, then 4-5 digits,
// optional hyphen, 4 digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\(?\d{2}\)?\s?)?(\d{4,5}-?\d{4})").expect("valid phone regex"));

/// The name rule only accepts a first line shorter than this many characters.
pub const MAX_NAME_CHARS: usize = 50;

pub const DEFAULT_SKILLS: &[&str] = &[
    "C#",
    ".NET",
    "ASP.NET",
    "JavaScript",
    "Python",
    "SQL",
    "Azure",
    "Docker",
    "React",
    "Angular",
];

/// Fixed confidence assigned by each extraction rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfidences {
    pub email: f64,
    pub phone: f64,
    pub name: f64,
    pub skill: f64,
}

impl Default for FieldConfidences {
    fn default() -> Self {
        Self {
            email: 0.99,
            phone: 0.85,
            name: 0.75,
            skill: 0.90,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldExtractor {
    skills: Vec<String>,
    confidences: FieldConfidences,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied(), FieldConfidences::default())
    }
}

impl FieldExtractor {
    /// Builds an extractor over `skills`. Entries that differ only by case
    /// are kept once, in first-seen order; blank entries are dropped.
    pub fn new<I, S>(skills: I, confidences: FieldConfidences) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
            .collect();

        Self {
            skills,
            confidences,
        }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Runs every rule over `text`. Total over all input: a rule that finds
    /// nothing leaves its field at the empty default.
    pub fn extract(&self, text: &str) -> ResumeFields {
        ResumeFields {
            name: self.extract_name(text),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.extract_skills(text),
        }
    }

    fn extract_email(&self, text: &str) -> ExtractedField {
        EMAIL_RE
            .find(text)
            .map(|m| ExtractedField::new(m.as_str(), self.confidences.email))
            .unwrap_or_default()
    }

    fn extract_phone(&self, text: &str) -> ExtractedField {
        PHONE_RE
            .find(text)
            .map(|m| ExtractedField::new(m.as_str(), self.confidences.phone))
            .unwrap_or_default()
    }

    fn extract_name(&self, text: &str) -> ExtractedField {
        let first_line = text.lines().map(str::trim).find(|line| !line.is_empty());

        match first_line {
            Some(line) if line.chars().count() < MAX_NAME_CHARS => {
                ExtractedField::new(line, self.confidences.name)
            }
            _ => ExtractedField::default(),
        }
    }

    fn extract_skills(&self, text: &str) -> Vec<ExtractedSkill> {
        let text_lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| text_lower.contains(&skill.to_lowercase()))
            .map(|skill| ExtractedSkill {
                name: skill.clone(),
                confidence: self.confidences.skill,
            })
            .collect()
    }
}
