// Blog block renderer.

use std::fmt::Write;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::feed::Post;

/// strftime pattern used when the config does not set one.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

const HEADING: &str = "### Latest from my blog";
const NO_POSTS: &str = "_No recent posts found._";

/// Render the blog block. Always ends with a "Last updated" line and a newline.
pub fn render_blog_block(posts: &[Post], date_format: &str, now: DateTime<Utc>) -> String {
    let mut buf = String::new();
    buf.push_str(HEADING);
    buf.push('\n');

    if posts.is_empty() {
        buf.push_str(NO_POSTS);
        buf.push('\n');
    }
    for post in posts {
        if post.published.is_empty() {
            let _ = writeln!(buf, "- [{}]({})", post.title, post.link);
        } else {
            let date = format_post_date(&post.published, date_format);
            let _ = writeln!(buf, "- [{}]({}) — {}", post.title, post.link, date);
        }
    }

    let _ = writeln!(buf, "Last updated: {}", now.format("%Y-%m-%d %H:%M UTC"));
    buf
}

/// Reformat a feed date with `pattern`, or return it untouched if it is not
/// in a known layout or the pattern cannot be rendered.
pub fn format_post_date(raw: &str, pattern: &str) -> String {
    let Some(date) = parse_post_date(raw.trim()) else {
        return raw.to_string();
    };

    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

/// Wall-clock time of a feed date, in the offset it was written in.
fn parse_post_date(raw: &str) -> Option<NaiveDateTime> {
    if let Some(date) = parse_rfc822_date(raw) {
        return Some(date);
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.naive_local())
}

/// RFC 822 style date. A leading weekday is not checked against the date.
fn parse_rfc822_date(raw: &str) -> Option<NaiveDateTime> {
    let body = match raw.split_once(',') {
        Some((weekday, rest))
            if weekday.len() == 3 && weekday.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            rest.trim_start()
        }
        _ => raw,
    };
    if let Ok(date) = DateTime::parse_from_rfc2822(body) {
        return Some(date.naive_local());
    }

    // Zone names RFC 2822 lacks (e.g. "UTC"), or no zone at all.
    let local = match body.rsplit_once(' ') {
        Some((time, zone)) if zone.chars().all(|c| c.is_ascii_alphabetic()) => time,
        _ => body,
    };
    NaiveDateTime::parse_from_str(local, "%d %b %Y %H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 19, 7, 5, 0).unwrap()
    }

    fn post(title: &str, link: &str, published: &str) -> Post {
        Post {
            title: title.to_string(),
            link: link.to_string(),
            published: published.to_string(),
        }
    }

    #[test]
    fn test_render_posts() {
        let posts = vec![
            post("Tiny CLI", "https://b.example/cli", "Sat, 18 Oct 2025 16:58:12 GMT"),
            post("No date", "https://b.example/nodate", ""),
        ];

        let block = render_blog_block(&posts, DEFAULT_DATE_FORMAT, now());

        assert_eq!(
            block,
            "### Latest from my blog\n\
             - [Tiny CLI](https://b.example/cli) — Oct 18, 2025\n\
             - [No date](https://b.example/nodate)\n\
             Last updated: 2025-10-19 07:05 UTC\n"
        );
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let block = render_blog_block(&[], DEFAULT_DATE_FORMAT, now());

        assert_eq!(
            block,
            "### Latest from my blog\n_No recent posts found._\nLast updated: 2025-10-19 07:05 UTC\n"
        );
    }

    #[test]
    fn test_known_date_layouts() {
        let fmt = "%Y-%m-%d";
        assert_eq!(format_post_date("Mon, 06 Oct 2025 09:00:00 +0000", fmt), "2025-10-06");
        assert_eq!(format_post_date("2025-09-02T08:00:00Z", fmt), "2025-09-02");
        assert_eq!(format_post_date("2025-09-02T23:30:00-04:00", fmt), "2025-09-02");
        assert_eq!(format_post_date("2025-09-02T08:00:00.250+02:00", fmt), "2025-09-02");
        assert_eq!(format_post_date("Tue, 02 Sep 2025 08:00:00", fmt), "2025-09-02");
    }

    #[test]
    fn test_mismatched_weekday_still_formats() {
        assert_eq!(
            format_post_date("Mon, 18 Oct 2025 16:58:12 GMT", DEFAULT_DATE_FORMAT),
            "Oct 18, 2025"
        );
        assert_eq!(
            format_post_date("Fri, 06 Oct 2025 09:00:00 +0000", DEFAULT_DATE_FORMAT),
            "Oct 06, 2025"
        );
        assert_eq!(
            format_post_date("Wed, 02 Sep 2025 08:00:00", "%Y-%m-%d"),
            "2025-09-02"
        );
    }

    #[test]
    fn test_utc_zone_name() {
        assert_eq!(
            format_post_date("Sat, 18 Oct 2025 23:10:00 UTC", "%Y-%m-%d %H:%M"),
            "2025-10-18 23:10"
        );
    }

    #[test]
    fn test_unknown_date_falls_back_to_raw() {
        assert_eq!(format_post_date("last Tuesday", DEFAULT_DATE_FORMAT), "last Tuesday");
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_raw() {
        let raw = "2025-09-02T08:00:00Z";
        assert_eq!(format_post_date(raw, "%Q"), raw);
    }
}
