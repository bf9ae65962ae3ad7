//! Heuristic profile extraction from CV text.
//!
//! Takes the plain text of an uploaded CV and pre-fills the fields the
//! completion step shows: contact details, a likely name, and short lists of
//! education, experience and leadership lines.
//!
//! # Heuristics
//!
//! - Email and phone: first regex match anywhere in the text.
//! - Name: first line with no email, no long digit run, and at most 4 words.
//! - Education / experience / leadership: keyword matches, capped at 3 / 5 / 3
//!   lines. Experience lines must not also look like education.
//! - Summary: unclassified lines of moderate length from the top 10 lines,
//!   joined and capped at 300 characters.

use std::sync::LazyLock;

use regex::Regex;

use crate::form::ExtractedProfile;

const MAX_EDUCATION: usize = 3;
const MAX_EXPERIENCE: usize = 5;
const MAX_LEADERSHIP: usize = 3;
const SUMMARY_WINDOW: usize = 10;
const SUMMARY_MAX_CHARS: usize = 300;

const EDUCATION_KEYWORDS: &[&str] = &[
    "university", "college", "school", "bachelor", "master", "phd", "bsc", "msc", "ba", "ma",
];
const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work", "employment", "job", "position"];
const EXPERIENCE_MARKERS: &[&str] = &[" at ", " - ", " in "];
const LEADERSHIP_KEYWORDS: &[&str] = &[
    "lead",
    "manage",
    "director",
    "head",
    "president",
    "vice president",
    "vp",
];

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").unwrap()
});
static LONG_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{10,}").unwrap());

/// Extract a profile from CV text. Never fails; unmatched fields stay empty.
pub fn extract_profile(text: &str) -> ExtractedProfile {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let email = EMAIL.find(text).map(|m| m.as_str().to_string());
    let phone = PHONE.find(text).map(|m| m.as_str().trim().to_string());

    let full_name = lines
        .iter()
        .find(|line| {
            !EMAIL.is_match(line) && !LONG_DIGITS.is_match(line) && line.split(' ').count() <= 4
        })
        .map(|line| line.to_string());

    let education = matching(&lines, MAX_EDUCATION, |lower| {
        contains_any(lower, EDUCATION_KEYWORDS)
    });
    let experience = matching(&lines, MAX_EXPERIENCE, |lower| {
        (contains_any(lower, EXPERIENCE_MARKERS) || contains_any(lower, EXPERIENCE_KEYWORDS))
            && !contains_any(lower, EDUCATION_KEYWORDS)
    });
    let leadership = matching(&lines, MAX_LEADERSHIP, |lower| {
        contains_any(lower, LEADERSHIP_KEYWORDS)
    });

    let summary: Vec<&str> = lines
        .iter()
        .take(SUMMARY_WINDOW)
        .copied()
        .filter(|line| {
            let len = line.chars().count();
            len > 20
                && len < 300
                && !education.iter().any(|l| l == line)
                && !experience.iter().any(|l| l == line)
                && !leadership.iter().any(|l| l == line)
                && !line.contains('@')
                && !LONG_DIGITS.is_match(line)
        })
        .collect();
    let profile_summary: String = summary.join(" ").chars().take(SUMMARY_MAX_CHARS).collect();

    ExtractedProfile {
        experience,
        leadership,
        profile_summary,
        education,
        full_name,
        email,
        phone,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First `limit` lines whose lowercase form satisfies `pred`.
fn matching(lines: &[&str], limit: usize, pred: impl Fn(&str) -> bool) -> Vec<String> {
    lines
        .iter()
        .filter(|line| pred(&line.to_lowercase()))
        .take(limit)
        .map(|line| line.to_string())
        .collect()
}
