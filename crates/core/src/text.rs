//! Text helpers for CMS markup: entity decoding, tag stripping, dates.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("hellip", "\u{2026}"),
    ("ndash", "\u{2013}"),
    ("mdash", "\u{2014}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
];

/// Decode numeric (`&#39;`, `&#x27;`) and common named entities in one pass.
///
/// Unknown or malformed entities are left as they are.
pub fn decode_html_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        // entities are short; only look a few bytes ahead for the `;`
        let window = &candidate.as_bytes()[1..candidate.len().min(12)];
        match window
            .iter()
            .position(|&b| b == b';')
            .filter(|&end| end > 0 && end <= 10)
        {
            Some(end) => {
                let entity = &candidate[1..=end];
                match decode_entity(entity) {
                    Some(decoded) => {
                        out.push_str(&decoded);
                        rest = &candidate[end + 2..];
                    }
                    None => {
                        out.push('&');
                        rest = &candidate[1..];
                    }
                }
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, value)| value.to_string())
}

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Remove anything that looks like a tag and trim the result
pub fn strip_html_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").trim().to_string()
}

/// Markup to plain text, suitable for descriptions.
///
/// Decoding can reveal new tags (`&lt;b&gt;`) and stripping can reveal new
/// entities, so both run until nothing changes. Each step that changes the
/// string makes it strictly shorter, so the loop terminates, and the result
/// is a fixed point: `plain_text(plain_text(s)) == plain_text(s)`.
pub fn plain_text(s: &str) -> String {
    let mut current = collapse_whitespace(s);
    loop {
        let next = collapse_whitespace(&strip_html_tags(&decode_html_entities(&current)));
        if next == current {
            return current;
        }
        current = next;
    }
}

fn collapse_whitespace(s: &str) -> String {
    WS_RE.replace_all(s, " ").trim().to_string()
}

/// Cut plain text to at most `max_words` words, adding an ellipsis when cut
pub fn truncate_words(s: &str, max_words: usize) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}\u{2026}", words[..max_words].join(" "))
}

pub fn word_count(markup: &str) -> usize {
    plain_text(markup).split_whitespace().count()
}

/// Format a CMS timestamp (`2024-05-01T10:00:00`) as `May 1, 2024`.
///
/// Unparseable input is returned unchanged.
pub fn format_date(date: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(date).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"));

    match parsed {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode_html_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_html_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_html_entities("it&#8217;s"), "it\u{2019}s");
        assert_eq!(decode_html_entities("it&#x27;s"), "it's");
        assert_eq!(decode_html_entities("&quot;q&quot; &apos;a&#39;"), "\"q\" 'a'");
        assert_eq!(decode_html_entities("wait&hellip;"), "wait\u{2026}");
    }

    #[test]
    fn test_decode_single_pass() {
        // one level only; plain_text handles nesting
        assert_eq!(decode_html_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_decode_leaves_malformed_alone() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("a & b; c"), "a & b; c");
        assert_eq!(decode_html_entities("&bogus;"), "&bogus;");
        assert_eq!(decode_html_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_html_entities("&#1114112;"), "&#1114112;");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
        assert_eq!(decode_html_entities(""), "");
    }

    #[test]
    fn test_decode_many_ampersands() {
        let input = format!("{}x;", "& ".repeat(50_000));
        assert_eq!(decode_html_entities(&input), input);
        assert_eq!(decode_html_entities("&"), "&");
        assert_eq!(decode_html_entities("&é;&amp;"), "&é;&");
        assert_eq!(decode_html_entities("&verylongname;"), "&verylongname;");
    }

    #[test]
    fn test_decode_unicode_passthrough() {
        assert_eq!(decode_html_entities("tondeuse &amp; café"), "tondeuse & café");
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("<p>Hello <em>there</em></p>\n"), "Hello there");
        assert_eq!(strip_html_tags("no tags"), "no tags");
        assert_eq!(strip_html_tags("a < b"), "a < b");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for input in ["<<b>b>", "a<<b>c>d", "<a<b>>", "x < y > z", "<p>ok</p>"] {
            let once = strip_html_tags(input);
            assert_eq!(strip_html_tags(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_plain_text_excerpt() {
        assert_eq!(
            plain_text("<p>Best mowers of 2024 &#8211; tested&nbsp;&amp; ranked</p>\n"),
            "Best mowers of 2024 \u{2013} tested & ranked"
        );
    }

    #[test]
    fn test_plain_text_is_idempotent() {
        let inputs = [
            "<p>Hello &amp; welcome</p>",
            "&amp;lt;b&amp;gt;bold&amp;lt;/b&amp;gt;",
            "&lt;script&gt;x&lt;/script&gt;",
            "&amp;amp;amp;",
            "  spaced\n\nout  ",
            "<<b>b>&gt;",
            "plain",
            "",
        ];
        for input in inputs {
            let once = plain_text(input);
            assert_eq!(plain_text(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_plain_text_unwraps_encoded_markup() {
        assert_eq!(plain_text("&lt;b&gt;bold&lt;/b&gt;"), "bold");
        assert_eq!(plain_text("&amp;amp;"), "&");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three", 5), "one two three");
        assert_eq!(truncate_words("one two three", 2), "one two\u{2026}");
        assert_eq!(truncate_words("", 2), "");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("<p>Cut the grass <strong>high</strong>.</p>"), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-01T10:00:00"), "May 1, 2024");
        assert_eq!(format_date("2023-12-25"), "December 25, 2023");
        assert_eq!(format_date("2024-02-03T08:00:00+00:00"), "February 3, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
