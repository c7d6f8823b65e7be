//! Dump parsing: splits a raw repository dump into ordered records.
//!
//! A dump is a single text document produced by the external fetch
//! collaborator. Each repository section opens with an 80-equals-sign banner
//! naming the repository; file entries inside a section use an analogous
//! `FILE:` banner that is deliberately left inside the section content so the
//! downstream heuristics can read the file paths.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::RepositoryRecord;

static REPOSITORY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"={80}\nREPOSITORY:\s*(.+?)\n={80}").expect("repository marker pattern")
});

/// Split a raw dump into repository records.
///
/// Anything before the first repository marker is a header fragment and is
/// discarded. Malformed or empty section content is a valid record; a dump
/// with no markers yields an empty list. This function never fails.
pub fn parse_dump(text: &str) -> Vec<RepositoryRecord> {
    let matches: Vec<_> = REPOSITORY_MARKER.captures_iter(text).collect();

    let mut records = Vec::with_capacity(matches.len());
    for (index, captures) in matches.iter().enumerate() {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let name = captures
            .get(1)
            .map(|group| group.as_str().trim())
            .unwrap_or_default();
        let content_end = matches
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map(|next| next.start())
            .unwrap_or(text.len());
        records.push(RepositoryRecord {
            name: name.to_string(),
            content: text[whole.end()..content_end].to_string(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::parse_dump;

    const BANNER: &str = "================================================================================";

    fn section(name: &str, content: &str) -> String {
        format!("\n{BANNER}\nREPOSITORY: {name}\n{BANNER}\n\n{content}")
    }

    #[test]
    fn splits_dump_into_named_records() {
        let dump = format!(
            "GitHub dump for octocat\n{}{}",
            section("alpha", "file one"),
            section("beta", "file two"),
        );

        let records = parse_dump(&dump);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "alpha");
        assert!(records[0].content.contains("file one"));
        assert_eq!(records[1].name, "beta");
        assert!(records[1].content.contains("file two"));
    }

    #[test]
    fn drops_leading_header_fragment() {
        let dump = format!("header text that mentions no repos\n{}", section("only", "data"));

        let records = parse_dump(&dump);

        assert_eq!(records.len(), 1);
        assert!(!records[0].content.contains("header text"));
    }

    #[test]
    fn empty_section_content_is_a_valid_record() {
        let dump = format!("{}{}", section("first", ""), section("second", "x"));

        let records = parse_dump(&dump);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "first");
    }

    #[test]
    fn dump_without_markers_yields_no_records() {
        assert!(parse_dump("just some loose text").is_empty());
        assert!(parse_dump("").is_empty());
    }

    #[test]
    fn file_banners_stay_inside_section_content() {
        let content = format!("{BANNER}\nFILE: src/app.py\n{BANNER}\n\nprint('hi')\n");
        let dump = section("repo", &content);

        let records = parse_dump(&dump);

        assert_eq!(records.len(), 1);
        assert!(records[0].content.contains("FILE: src/app.py"));
        assert!(records[0].content.contains("print('hi')"));
    }
}
