//! Structured-input detector for the gathering stage.
//!
//! A lightweight heuristic: input that contains a date-like pattern or one of
//! the keywords born/birth/dob/time/place is treated as birth details,
//! everything else as conversation. Recognized details are pulled apart into
//! date, time and place on a best-effort basis.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:\d{{1,2}}[/.\-]\d{{1,2}}[/.\-]\d{{2,4}}|\d{{4}}-\d{{1,2}}-\d{{1,2}}|{MONTH}\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+{MONTH}(?:,?\s+\d{{4}})?)\b"
    ))
    .expect("date pattern is valid")
});

static TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}:\d{2}\s*(?:am|pm|a\.m\.|p\.m\.)?|\b\d{1,2}\s*(?:am|pm)\b")
        .expect("time pattern is valid")
});

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:born|birth\w*|dob|time|place)\b").expect("keyword pattern is valid")
});

static PLACE_AFTER_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|at)\s+([A-Z][A-Za-z.'\-]*(?:[ ,]+[A-Z][A-Za-z.'\-]*)*)")
        .expect("place pattern is valid")
});

/// Birth details recognized in a user submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    /// The submission as typed.
    pub raw: String,
    /// Date fragment, if one was found.
    #[serde(default)]
    pub date: Option<String>,
    /// Time fragment, if one was found.
    #[serde(default)]
    pub time: Option<String>,
    /// Place fragment, if one was found.
    #[serde(default)]
    pub place: Option<String>,
}

/// How a gathering-stage submission was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// The submission carries birth details.
    BirthData(BirthData),
    /// The submission is conversation.
    Conversational,
}

/// Returns `true` if the input looks like birth details.
#[must_use]
pub fn looks_structured(input: &str) -> bool {
    DATE.is_match(input) || KEYWORD.is_match(input)
}

/// Classifies a gathering-stage submission.
#[must_use]
pub fn classify(input: &str) -> InputKind {
    let input = input.trim();
    if !looks_structured(input) {
        return InputKind::Conversational;
    }
    let date = DATE.find(input).map(|m| m.as_str().to_owned());
    let time = TIME.find(input).map(|m| m.as_str().trim().to_owned());
    let place = extract_place(input);
    InputKind::BirthData(BirthData {
        raw: input.to_owned(),
        date,
        time,
        place,
    })
}

fn extract_place(input: &str) -> Option<String> {
    if let Some(caps) = PLACE_AFTER_PREPOSITION.captures(input) {
        let place = caps[1].trim_end_matches([',', '.', ' ']).trim();
        if !place.is_empty() {
            return Some(place.to_owned());
        }
    }

    // Comma-separated form: "3/14/1990, 10:32am, Austin TX".
    let stripped = TIME.replace_all(&DATE.replace_all(input, ""), "").into_owned();
    let segments: Vec<&str> = stripped
        .split([',', ';', '\n'])
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '.'))
        .filter(|s| s.chars().any(char::is_alphabetic) && !KEYWORD.is_match(s))
        .collect();
    (!segments.is_empty()).then(|| segments.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birth(input: &str) -> BirthData {
        match classify(input) {
            InputKind::BirthData(data) => data,
            InputKind::Conversational => panic!("expected birth data for {input:?}"),
        }
    }

    #[test]
    fn test_numeric_date_time_and_place_are_extracted() {
        let data = birth("3/14/1990, 10:32am, Austin TX");

        assert_eq!(data.date.as_deref(), Some("3/14/1990"));
        assert_eq!(data.time.as_deref(), Some("10:32am"));
        assert_eq!(data.place.as_deref(), Some("Austin TX"));
        assert_eq!(data.raw, "3/14/1990, 10:32am, Austin TX");
    }

    #[test]
    fn test_small_talk_is_conversational() {
        assert_eq!(classify("just chatting"), InputKind::Conversational);
        assert_eq!(classify("hello there, how are you?"), InputKind::Conversational);
        assert_eq!(classify("   "), InputKind::Conversational);
    }

    #[test]
    fn test_words_starting_like_a_month_are_not_dates() {
        for input in [
            "maybe 2 things on my mind",
            "married 10 years now",
            "Mark 3 is my favourite passage",
            "junk 4 sale",
            "10 marbles in a jar",
        ] {
            assert_eq!(classify(input), InputKind::Conversational, "{input:?}");
        }
    }

    #[test]
    fn test_abbreviated_and_full_months_are_dates() {
        assert_eq!(birth("Sept. 9, 1984").date.as_deref(), Some("Sept. 9, 1984"));
        assert_eq!(birth("june 21").date.as_deref(), Some("june 21"));
        assert_eq!(birth("2 Dec 2001").date.as_deref(), Some("2 Dec 2001"));
    }

    #[test]
    fn test_written_month_with_preposition_place() {
        let data = birth("March 3, 1990 at 4pm in Lisbon");

        assert_eq!(data.date.as_deref(), Some("March 3, 1990"));
        assert_eq!(data.time.as_deref(), Some("4pm"));
        assert_eq!(data.place.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_day_before_month() {
        let data = birth("14th Feb 1988");

        assert_eq!(data.date.as_deref(), Some("14th Feb 1988"));
        assert_eq!(data.time, None);
    }

    #[test]
    fn test_iso_date() {
        let data = birth("1975-07-02");
        assert_eq!(data.date.as_deref(), Some("1975-07-02"));
    }

    #[test]
    fn test_keyword_without_date_counts_as_structured() {
        let data = birth("I was born in New York City, NY");

        assert_eq!(data.date, None);
        assert_eq!(data.place.as_deref(), Some("New York City, NY"));
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert!(looks_structured("DOB unknown"));
        assert!(looks_structured("my birthday is soon"));
        assert!(looks_structured("not sure of the Time"));
        assert!(!looks_structured("sometimes I wonder"));
    }
}
