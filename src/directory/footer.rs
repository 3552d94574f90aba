//! Hashtag footer grammar.
//!
//! ```text
//! #event 2022-07-09
//! #contacts
//! #chats
//! ```

use chrono::NaiveDate;
use regex::Regex;

use crate::db::{PostFooter, PostType};

static EVENT_FOOTER: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"#event\s+([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap()
});

static NAVIGATION_FOOTER: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"#(chats|contacts|events_archive|lectures_archive|whois_howto)\b").unwrap()
});

/// Parse the directory footer out of a message text.
///
/// An event tag with a calendar-valid date wins over any navigation tag.
/// Event tags whose date does not exist (month 13, Feb 30) are skipped.
#[must_use]
pub fn parse_footer(text: &str) -> Option<PostFooter> {
    let event_date = EVENT_FOOTER
        .captures_iter(text)
        .find_map(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok());
    if let Some(date) = event_date {
        return Some(PostFooter::event(date));
    }

    NAVIGATION_FOOTER
        .captures(text)
        .and_then(|caps| PostType::from_str(&caps[1]))
        .map(PostFooter::navigation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_event_footer() {
        let footer = parse_footer("Митап в пятницу\n\n#event 2022-07-09").unwrap();
        assert_eq!(footer, PostFooter::event(date(2022, 7, 9)));
    }

    #[test]
    fn test_event_footer_anywhere_in_text() {
        let footer = parse_footer("#event\t2030-05-01 then more words").unwrap();
        assert_eq!(footer.event_date, Some(date(2030, 5, 1)));

        let footer = parse_footer("intro\n#event\n\n2030-05-01").unwrap();
        assert_eq!(footer.post_type, PostType::Event);
    }

    #[test]
    fn test_every_navigation_footer() {
        for post_type in PostType::NAVIGATION {
            let text = format!("Some post\n#{}", post_type.as_str());
            assert_eq!(
                parse_footer(&text),
                Some(PostFooter::navigation(post_type)),
                "{text}"
            );
        }
    }

    #[test]
    fn test_event_takes_precedence() {
        let footer = parse_footer("#contacts\n#event 2030-05-01").unwrap();
        assert_eq!(footer, PostFooter::event(date(2030, 5, 1)));

        let footer = parse_footer("#event 2030-05-01 #chats").unwrap();
        assert_eq!(footer.post_type, PostType::Event);
    }

    #[test]
    fn test_invalid_date_falls_back_to_navigation() {
        assert_eq!(parse_footer("#event 2030-13-01"), None);
        assert_eq!(parse_footer("#event 2023-02-30"), None);

        let footer = parse_footer("#event 2030-13-01\n#lectures_archive").unwrap();
        assert_eq!(footer, PostFooter::navigation(PostType::LecturesArchive));
    }

    #[test]
    fn test_later_valid_event_after_invalid_one() {
        let footer = parse_footer("#event 2030-00-10 #event 2030-01-10").unwrap();
        assert_eq!(footer.event_date, Some(date(2030, 1, 10)));
    }

    #[test]
    fn test_no_footer() {
        assert_eq!(parse_footer(""), None);
        assert_eq!(parse_footer("just a regular message"), None);
        assert_eq!(parse_footer("contacts without hash"), None);
        // No date means no event footer
        assert_eq!(parse_footer("#event soon"), None);
        assert_eq!(parse_footer("#event"), None);
    }

    #[test]
    fn test_grammar_is_exact() {
        assert_eq!(parse_footer("#Contacts"), None);
        assert_eq!(parse_footer("#EVENT 2030-05-01"), None);
        assert_eq!(parse_footer("#contacts_old"), None);
        assert_eq!(parse_footer("#event2030-05-01"), None);
        assert_eq!(parse_footer("#event 2030-5-1"), None);
        // events_archive is its own tag, not an event
        assert_eq!(
            parse_footer("#events_archive"),
            Some(PostFooter::navigation(PostType::EventsArchive))
        );
    }

    #[test]
    fn test_navigation_ignores_trailing_date() {
        assert_eq!(
            parse_footer("#contacts 2030-05-01"),
            Some(PostFooter::navigation(PostType::Contacts))
        );
    }
}
