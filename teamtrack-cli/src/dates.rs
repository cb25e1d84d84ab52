use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// Parse a due or event date: `YYYY-MM-DD`, or anything fuzzydate
/// understands ("tomorrow", "next friday", "mar 20").
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Date is empty"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(trimmed);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| anyhow!("Could not parse date: \"{}\"", input))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
        ("tmrw", "tomorrow"),
    ];

    let lower = input.to_lowercase();
    lower
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn iso_dates_parse_exactly() {
        assert_eq!(
            parse_date("2025-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        assert_eq!(
            parse_date("  2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn abbreviations_expand_word_by_word() {
        assert_eq!(expand_abbreviations("Fri"), "friday");
        assert_eq!(expand_abbreviations("next  tue"), "next tuesday");
        assert_eq!(expand_abbreviations("mar 20"), "march 20");
        assert_eq!(expand_abbreviations("friday"), "friday");
    }

    #[test]
    fn month_day_phrases_parse() {
        let date = parse_date("march 20").unwrap();
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 20);
    }

    #[test]
    fn abbreviated_month_parses() {
        let date = parse_date("dec 5").unwrap();
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 5);
    }

    #[test]
    fn nonsense_and_empty_are_errors() {
        assert!(parse_date("not a date at all xyz").is_err());
        assert!(parse_date("   ").is_err());
    }
}
