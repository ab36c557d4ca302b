use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::class::FieldClass;
use super::tables::{invert_digits, substitute_confusables};

/// Characters kept by the universal pass: word chars, whitespace, `&`, `:`, `-`.
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s&:-]").expect("valid disallowed-chars pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Ordinal down/quarter number: 1st, 2ND, 3Rd, 4th.
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[1-4](?:st|nd|rd|th)\b").expect("valid ordinal pattern"));

/// A lone `8` between the ordinal and the distance is a misread `&`. Anywhere
/// else an `8` is a distance.
static EIGHT_AS_AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([1-4](?:st|nd|rd|th))\s+8\s+").expect("valid misread pattern")
});

/// A lone `a` is always a misread `&`.
static A_AS_AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\ba\b").expect("valid lone-a pattern"));

/// Tokens OCR produces for "2nd" on quarter indicators. `ond` has already
/// become `0nd` by the time this runs.
static SECOND_MISREAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:[o0]nd|nrd|qtr|q)\b").expect("valid quarter misread pattern"));

/// Quarter number with optional suffix, absorbing an existing "Quarter" word.
static QUARTER_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([1-4])(st|nd|rd|th)?\b(?:\s*quarter\b)?").expect("valid quarter pattern")
});

/// Normalizes raw OCR text for one field class into its canonical form.
///
/// An empty result means the text held no usable value. Never fails.
pub fn normalize(raw: &str, class: &FieldClass) -> String {
    let text = clean_universal(raw);

    match class {
        FieldClass::Down => normalize_down(&text),
        FieldClass::Quarter => normalize_quarter(&text),
        FieldClass::YardNumber => normalize_yard_number(&text),
        FieldClass::Score => normalize_score(&text),
        FieldClass::PlayTime => normalize_play_time(&text),
        FieldClass::Clock
        | FieldClass::Scoreboard
        | FieldClass::Personnel(_)
        | FieldClass::Other(_) => text,
    }
}

/// Strips stray symbols, collapses whitespace and swaps digit look-alikes.
fn clean_universal(raw: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(raw.trim(), "");
    let collapsed = collapse_whitespace(&stripped);
    substitute_confusables(&collapsed)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

fn normalize_down(text: &str) -> String {
    let text = ORDINAL.replace_all(text, |caps: &Captures| caps[0].to_lowercase());
    let text = EIGHT_AS_AMPERSAND.replace_all(&text, "$1 & ");
    let text = A_AS_AMPERSAND.replace_all(&text, " & ");
    let text = text.replace('&', " & ");

    let worded = collapse_whitespace(&text)
        .split(' ')
        .map(|token| if token == "&" { "and" } else { token })
        .collect::<Vec<_>>()
        .join(" ");

    title_case(&worded)
}

fn normalize_quarter(text: &str) -> String {
    let text = SECOND_MISREAD.replace_all(text, "2nd");
    let text = QUARTER_NUMBER.replace_all(&text, |caps: &Captures| {
        let suffix = caps
            .get(2)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| "th".to_string());
        format!("{}{} Quarter", &caps[1], suffix)
    });
    text.trim().to_string()
}

fn normalize_yard_number(text: &str) -> String {
    let digits = invert_digits(&digits_only(text));
    match digits.len() {
        0 => String::new(),
        1 => format!("0{}", digits),
        n => digits[n - 2..].to_string(),
    }
}

fn normalize_score(text: &str) -> String {
    let digits = digits_only(text);
    // Odd counts usually carry a trailing artifact; single digits are kept.
    if digits.len() % 2 == 0 || digits.len() == 1 {
        digits
    } else {
        digits[..digits.len() - 1].to_string()
    }
}

fn normalize_play_time(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    if kept.len() == 1 && kept.chars().all(|c| c.is_ascii_digit()) {
        format!("0{}", kept)
    } else {
        kept
    }
}

fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Capitalizes every letter that follows a non-letter and lowercases the rest,
/// so "1st and 10" becomes "1St And 10".
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alphabetic = false;
    for c in text.chars() {
        if prev_alphabetic {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alphabetic = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_classes() -> Vec<FieldClass> {
        vec![
            FieldClass::Score,
            FieldClass::Quarter,
            FieldClass::Down,
            FieldClass::YardNumber,
            FieldClass::PlayTime,
            FieldClass::Clock,
            FieldClass::Scoreboard,
            FieldClass::Other("Team".to_string()),
        ]
    }

    #[test]
    fn test_universal_pass() {
        assert_eq!(normalize("  12:0O  ", &FieldClass::Clock), "12:00");
        assert_eq!(normalize("a\t\n b!!", &FieldClass::Clock), "a b");
        assert_eq!(normalize("BUF | KC", &FieldClass::Other("Team".into())), "BUF KC");
    }

    #[test]
    fn test_down_ampersand_and_ordinal() {
        assert_eq!(normalize("1St&10", &FieldClass::Down), "1St And 10");
        assert_eq!(normalize("1st&10", &FieldClass::Down), "1St And 10");
        assert_eq!(normalize("2ND & 7", &FieldClass::Down), "2Nd And 7");
    }

    #[test]
    fn test_down_misread_ampersand() {
        assert_eq!(normalize("3rd a 5", &FieldClass::Down), "3Rd And 5");
        assert_eq!(normalize("4th 8 2", &FieldClass::Down), "4Th And 2");
        // A trailing 8 is the distance, not an ampersand
        assert_eq!(normalize("4th & 8", &FieldClass::Down), "4Th And 8");
    }

    #[test]
    fn test_down_lone_a_anywhere() {
        assert_eq!(normalize("a 10", &FieldClass::Down), "And 10");
        assert_eq!(normalize("4th 10 a", &FieldClass::Down), "4Th 10 And");
        assert_eq!(normalize("2nd A 7", &FieldClass::Down), "2Nd And 7");
        // Only the 8 right after the ordinal is an ampersand
        assert_eq!(normalize("8 8", &FieldClass::Down), "8 8");
    }

    #[test]
    fn test_down_idempotent() {
        assert_eq!(normalize("1St And 10", &FieldClass::Down), "1St And 10");
    }

    #[test]
    fn test_quarter() {
        assert_eq!(normalize("2ND", &FieldClass::Quarter), "2nd Quarter");
        assert_eq!(normalize("3", &FieldClass::Quarter), "3th Quarter");
        assert_eq!(normalize("4th", &FieldClass::Quarter), "4th Quarter");
        assert_eq!(normalize("ond", &FieldClass::Quarter), "2nd Quarter");
        assert_eq!(normalize("Q", &FieldClass::Quarter), "2nd Quarter");
    }

    #[test]
    fn test_quarter_idempotent() {
        assert_eq!(normalize("2nd Quarter", &FieldClass::Quarter), "2nd Quarter");
        assert_eq!(normalize("1st Quarter", &FieldClass::Quarter), "1st Quarter");
    }

    #[test]
    fn test_yard_number() {
        assert_eq!(normalize("O12", &FieldClass::YardNumber), "12");
        assert_eq!(normalize("5", &FieldClass::YardNumber), "05");
        assert_eq!(normalize("--", &FieldClass::YardNumber), "");
        // Upside-down capture: "09" reads back as "06"
        assert_eq!(normalize("09", &FieldClass::YardNumber), "06");
        assert_eq!(normalize("1 2 5", &FieldClass::YardNumber), "25");
    }

    #[test]
    fn test_score() {
        assert_eq!(normalize("123", &FieldClass::Score), "12");
        assert_eq!(normalize("1234", &FieldClass::Score), "1234");
        assert_eq!(normalize("7", &FieldClass::Score), "7");
        assert_eq!(normalize("x", &FieldClass::Score), "");
        assert_eq!(normalize("2l", &FieldClass::Score), "21");
    }

    #[test]
    fn test_play_time() {
        assert_eq!(normalize("7", &FieldClass::PlayTime), "07");
        assert_eq!(normalize(":15s", &FieldClass::PlayTime), ":15");
        assert_eq!(normalize("2:0O", &FieldClass::PlayTime), "2:00");
        assert_eq!(normalize("abc", &FieldClass::PlayTime), "");
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let inputs = ["", "   ", "&&&", "\u{00e9}\u{00e8}", "ー一", "1st & & 10", "::::", "99999"];
        for class in all_classes() {
            for input in inputs {
                let _ = normalize(input, &class);
            }
        }
    }

    #[test]
    fn test_digit_fields_have_documented_shape() {
        let inputs = ["", "O", "12", "987", "abc 4", "1 2 3 4 5"];
        for input in inputs {
            let yard = normalize(input, &FieldClass::YardNumber);
            assert!(yard.is_empty() || (yard.len() == 2 && yard.chars().all(|c| c.is_ascii_digit())));

            let score = normalize(input, &FieldClass::Score);
            assert!(score.chars().all(|c| c.is_ascii_digit()));
            assert!(score.len() <= 1 || score.len() % 2 == 0);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("1st and 10"), "1St And 10");
        assert_eq!(title_case("GOAL"), "Goal");
    }
}
