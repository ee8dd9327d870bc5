//! Standup comment formatting and discussion title matching.
//!
//! Builds the date-based title used to locate today's standup discussion
//! and renders the collected sections into the comment body that gets
//! posted.

use chrono::{Datelike, NaiveDate};

use crate::github::client::Discussion;
use crate::session::StandupReport;

/// Trailing attribution appended to every comment.
const ATTRIBUTION: &str = "<sub>Sent with [Standup](https://github.com/standup-cli/standup)</sub>";

/// Returns the English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    // 11th-13th take "th" despite ending in 1-3.
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Expected title of the standup discussion for `date`,
/// e.g. `"Standup (Monday, April 03rd, 2023)"`.
pub fn standup_title(date: NaiveDate) -> String {
    format!(
        "Standup ({}, {} {:02}{}, {})",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// Finds the discussion whose title equals `title` exactly.
pub fn find_standup_discussion<'a>(
    title: &str,
    discussions: &'a [Discussion],
) -> Option<&'a Discussion> {
    discussions.iter().find(|discussion| discussion.title == title)
}

/// Joins section entries into a bullet-list body.
fn join_items(items: &[String]) -> String {
    items.join("\n - ")
}

/// Renders the full standup comment for submission.
pub fn render_comment(report: &StandupReport) -> String {
    format!(
        "**Yesterday**:\n - {}\n\n\
         **Today**:\n - {}\n\n\
         **Blockers**:\n - {}\n\n\
         **Shoutouts**:\n - {}\n\n\
         {ATTRIBUTION}",
        join_items(&report.yesterday),
        join_items(&report.today),
        join_items(&report.blockers),
        join_items(&report.shoutouts),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ordinal_suffix_table() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(10), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(20), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(24), "th");
        assert_eq!(ordinal_suffix(30), "th");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn test_standup_title_zero_pads_the_day() {
        assert_eq!(
            standup_title(date(2023, 4, 3)),
            "Standup (Monday, April 03rd, 2023)"
        );
    }

    #[test]
    fn test_standup_title_teens_use_th() {
        assert_eq!(
            standup_title(date(2023, 4, 11)),
            "Standup (Tuesday, April 11th, 2023)"
        );
    }

    #[test]
    fn test_standup_title_two_digit_day() {
        assert_eq!(
            standup_title(date(2023, 3, 31)),
            "Standup (Friday, March 31st, 2023)"
        );
    }

    #[test]
    fn test_find_standup_discussion_exact_match_only() {
        let discussions = vec![
            Discussion {
                number: 1,
                title: "Standup (Monday, April 03rd, 2023) - overflow".to_string(),
            },
            Discussion {
                number: 2,
                title: "Standup (Monday, April 03rd, 2023)".to_string(),
            },
        ];
        let found =
            find_standup_discussion("Standup (Monday, April 03rd, 2023)", &discussions).unwrap();
        assert_eq!(found.number, 2);
    }

    #[test]
    fn test_find_standup_discussion_none() {
        let discussions = vec![Discussion {
            number: 1,
            title: "Retro notes".to_string(),
        }];
        assert!(find_standup_discussion("Standup (Monday, April 03rd, 2023)", &discussions).is_none());
    }

    #[test]
    fn test_find_standup_discussion_returns_first_of_duplicates() {
        let discussions = vec![
            Discussion {
                number: 5,
                title: "Standup (Monday, April 03rd, 2023)".to_string(),
            },
            Discussion {
                number: 9,
                title: "Standup (Monday, April 03rd, 2023)".to_string(),
            },
        ];
        let found =
            find_standup_discussion("Standup (Monday, April 03rd, 2023)", &discussions).unwrap();
        assert_eq!(found.number, 5);
    }

    #[test]
    fn test_render_comment_layout() {
        let report = StandupReport {
            yesterday: vec!["shipped the parser".to_string()],
            today: vec!["reviews".to_string(), "docs".to_string()],
            blockers: vec!["N/A".to_string()],
            shoutouts: vec!["@alice for the rescue".to_string()],
        };

        let comment = render_comment(&report);
        let expected = "**Yesterday**:\n - shipped the parser\n\n\
                        **Today**:\n - reviews\n - docs\n\n\
                        **Blockers**:\n - N/A\n\n\
                        **Shoutouts**:\n - @alice for the rescue\n\n\
                        <sub>Sent with [Standup](https://github.com/standup-cli/standup)</sub>";
        assert_eq!(comment, expected);
    }

    #[test]
    fn test_render_comment_has_no_trailing_newline() {
        let report = StandupReport {
            yesterday: vec!["a".to_string()],
            today: vec!["b".to_string()],
            blockers: vec!["N/A".to_string()],
            shoutouts: vec!["N/A".to_string()],
        };
        assert!(!render_comment(&report).ends_with('\n'));
    }
}
