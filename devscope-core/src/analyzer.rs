//! Per-repository heuristic analysis.
//!
//! Every detector here is a fixed signature table scanned over the raw
//! section content. The analyzer is deterministic and side-effect-free:
//! the same record always produces the same analysis.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use regex::Regex;

use crate::domain::{CommitStamp, RepositoryAnalysis, RepositoryRecord, round2};

/// Maximum number of library entries kept per repository.
pub const LIBRARY_CAP: usize = 30;
/// Maximum number of file-type entries kept per repository.
pub const FILE_TYPE_CAP: usize = 20;
/// Maximum number of timestamp matches scanned per repository.
pub const COMMIT_SCAN_CAP: usize = 100;

/// Library names shorter than this are discarded as noise.
const MIN_LIBRARY_NAME_LEN: usize = 3;
/// Trivial names that dominate import statements without signalling anything.
const LIBRARY_STOPLIST: &[&str] = &["sys", "os", "io", "re"];

const BYTES_PER_KB: f64 = 1024.0;
const COVERAGE_SCALE: f64 = 100.0;
const COVERAGE_CAP: f64 = 100.0;

/// Language extension signatures, scanned case-insensitively.
const LANGUAGE_SIGNATURES: &[(&str, &str)] = &[
    ("Python", r"\.py\b"),
    ("JavaScript", r"\.js\b"),
    ("TypeScript", r"\.ts\b"),
    ("Shell", r"\.sh\b"),
    ("JSON", r"\.json\b"),
    ("Markdown", r"\.md\b"),
    ("YAML", r"\.yml\b|\.yaml\b"),
    ("HTML", r"\.html\b"),
    ("CSS", r"\.css\b"),
];

/// Framework presence signatures, scanned case-insensitively.
const FRAMEWORK_SIGNATURES: &[(&str, &str)] = &[
    ("pytest", r"\bpytest\b"),
    ("GitHub Actions", r"\.github/workflows"),
    ("Git", r"\bgit\b"),
    ("Docker", r"\bdocker\b"),
    ("Claude Code", r"\bclaude.code\b|claude-plugin"),
    ("Ollama", r"\bollama\b"),
    ("MCP", r"\bmcp\b"),
];

/// Test-related keyword signatures, scanned case-insensitively.
const TEST_INDICATOR_SIGNATURES: &[&str] = &[
    r"\btest[_-]",
    r"[_-]test\.",
    r"\.test\.",
    r"\bspec/",
    r"\btest/",
    r"\btesting\b",
    r"\bassert\b",
    r"\bpytest\b",
];

static LANGUAGE_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_table(LANGUAGE_SIGNATURES));

static FRAMEWORK_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_table(FRAMEWORK_SIGNATURES));

static TEST_INDICATOR_MATCHERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TEST_INDICATOR_SIGNATURES
        .iter()
        .map(|pattern| {
            Regex::new(&format!("(?i){pattern}")).expect("test indicator pattern")
        })
        .collect()
});

/// Import-style statements; the first dot-separated path segment counts.
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:import|from)\s+([A-Za-z0-9_.\-]+)").expect("import pattern")
});

/// Manifest dependency entries in the `"name": "1.2.3"` shape.
static MANIFEST_DEPENDENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([A-Za-z0-9_\-]+)":\s*"\d+\.\d+\.\d+""#).expect("manifest dependency pattern")
});

/// Pinned requirement entries in the `name==1.2.3` shape.
static PINNED_DEPENDENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_\-]+)==\d+\.\d+\.\d+").expect("pinned dependency pattern")
});

/// ISO-8601 date-time substrings, second resolution.
static TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("timestamp pattern")
});

/// Dotted alphanumeric suffixes, the raw material of the file-type histogram.
static FILE_TYPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9]+)\b").expect("file type pattern"));

/// Extensions that count as code files for the coverage denominator.
static CODE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(py|js|ts|sh)\b").expect("code file pattern"));

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Compile a signature table with case-insensitive matching.
fn compile_table(table: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    table
        .iter()
        .map(|(name, pattern)| {
            let compiled = Regex::new(&format!("(?i){pattern}")).expect("signature pattern");
            (*name, compiled)
        })
        .collect()
}

/// Analyze one repository record into its heuristic signal set.
pub fn analyze_repository(record: &RepositoryRecord) -> RepositoryAnalysis {
    RepositoryAnalysis {
        name: record.name.clone(),
        languages: detect_languages(&record.content),
        libraries: detect_libraries(&record.content),
        frameworks: detect_frameworks(&record.content),
        commits: extract_commits(&record.content),
        size_kb: round2(record.content.len() as f64 / BYTES_PER_KB),
        file_types: file_type_histogram(&record.content),
        test_coverage: estimate_test_coverage(&record.content),
    }
}

fn detect_languages(content: &str) -> IndexMap<String, u64> {
    let mut languages = IndexMap::new();
    for (name, matcher) in LANGUAGE_MATCHERS.iter() {
        let count = matcher.find_iter(content).count() as u64;
        if count > 0 {
            languages.insert((*name).to_string(), count);
        }
    }
    languages
}

fn detect_libraries(content: &str) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();

    for captures in IMPORT_PATTERN.captures_iter(content) {
        let imported = &captures[1];
        let base = imported.split('.').next().unwrap_or(imported);
        *counts.entry(base.to_string()).or_insert(0) += 1;
    }

    for captures in MANIFEST_DEPENDENCY_PATTERN.captures_iter(content) {
        *counts.entry(captures[1].to_string()).or_insert(0) += 1;
    }
    for captures in PINNED_DEPENDENCY_PATTERN.captures_iter(content) {
        *counts.entry(captures[1].to_string()).or_insert(0) += 1;
    }

    counts.retain(|name, _| {
        name.len() >= MIN_LIBRARY_NAME_LEN && !LIBRARY_STOPLIST.contains(&name.as_str())
    });

    rank_descending(counts, LIBRARY_CAP)
}

fn detect_frameworks(content: &str) -> Vec<String> {
    let mut frameworks: Vec<String> = FRAMEWORK_MATCHERS
        .iter()
        .filter(|(_, matcher)| matcher.is_match(content))
        .map(|(name, _)| (*name).to_string())
        .collect();
    frameworks.sort();
    frameworks
}

fn extract_commits(content: &str) -> Vec<CommitStamp> {
    TIMESTAMP_PATTERN
        .find_iter(content)
        .take(COMMIT_SCAN_CAP)
        .filter_map(|found| {
            let date = found.as_str();
            NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT)
                .ok()
                .map(|parsed| CommitStamp {
                    date: date.to_string(),
                    timestamp: parsed.and_utc().timestamp(),
                })
        })
        .collect()
}

fn file_type_histogram(content: &str) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for captures in FILE_TYPE_PATTERN.captures_iter(content) {
        let extension = captures[1].to_lowercase();
        *counts.entry(extension).or_insert(0) += 1;
    }
    rank_descending(counts, FILE_TYPE_CAP)
}

fn estimate_test_coverage(content: &str) -> f64 {
    let code_files = CODE_FILE_PATTERN.find_iter(content).count();
    if code_files == 0 {
        return 0.0;
    }

    let test_matches: usize = TEST_INDICATOR_MATCHERS
        .iter()
        .map(|matcher| matcher.find_iter(content).count())
        .sum();

    let coverage = (test_matches as f64 / code_files as f64) * COVERAGE_SCALE;
    round2(coverage.min(COVERAGE_CAP))
}

/// Stable descending sort by count, truncated to `cap` entries. Equal counts
/// preserve first-encountered order.
fn rank_descending(counts: IndexMap<String, u64>, cap: usize) -> IndexMap<String, u64> {
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(cap);
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryRecord;

    fn record(content: &str) -> RepositoryRecord {
        RepositoryRecord {
            name: "sample".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn detects_languages_from_extension_signatures() {
        let analysis = analyze_repository(&record("FILE: app.py\nFILE: index.html\nFILE: a.PY"));

        assert_eq!(analysis.languages.get("Python").copied(), Some(2));
        assert_eq!(analysis.languages.get("HTML").copied(), Some(1));
        assert!(!analysis.languages.contains_key("CSS"));
    }

    #[test]
    fn python_file_and_pinned_requirement_detects_flask_without_frameworks() {
        let content = "FILE: app.py\n\nFILE: requirements.txt\n\n\"flask==2.0.0\"\n";
        let analysis = analyze_repository(&record(content));

        assert!(analysis.languages.get("Python").copied().unwrap_or(0) >= 1);
        assert!(analysis.libraries.contains_key("flask"));
        assert!(analysis.frameworks.is_empty());
    }

    #[test]
    fn library_detection_keeps_first_import_segment() {
        let content = "import collections.abc\nfrom requests import get\nimport requests\n";
        let analysis = analyze_repository(&record(content));

        assert_eq!(analysis.libraries.get("collections").copied(), Some(1));
        assert_eq!(analysis.libraries.get("requests").copied(), Some(2));
    }

    #[test]
    fn library_detection_drops_short_names_and_stoplist() {
        let content = "import os\nimport re\nimport ml\nimport numpy\n";
        let analysis = analyze_repository(&record(content));

        assert!(!analysis.libraries.contains_key("os"));
        assert!(!analysis.libraries.contains_key("re"));
        assert!(!analysis.libraries.contains_key("ml"));
        assert!(analysis.libraries.contains_key("numpy"));
    }

    #[test]
    fn library_detection_counts_manifest_entries() {
        let content = "\"express\": \"4.18.2\",\n\"lodash\": \"4.17.21\"\nimport express\n";
        let analysis = analyze_repository(&record(content));

        assert_eq!(analysis.libraries.get("express").copied(), Some(2));
        assert_eq!(analysis.libraries.get("lodash").copied(), Some(1));
    }

    #[test]
    fn library_ranking_caps_at_thirty_with_stable_ties() {
        let mut content = String::new();
        for index in 0..35 {
            content.push_str(&format!("import lib{index:02}\n"));
        }
        // lib00 appears twice so it must rank first.
        content.push_str("import lib00\n");
        let analysis = analyze_repository(&record(&content));

        assert_eq!(analysis.libraries.len(), LIBRARY_CAP);
        let first = analysis.libraries.keys().next().expect("first entry");
        assert_eq!(first, "lib00");
        // Equal-count entries keep encounter order.
        let keys: Vec<&String> = analysis.libraries.keys().collect();
        assert_eq!(keys[1], "lib01");
        assert_eq!(keys[2], "lib02");
    }

    #[test]
    fn framework_detection_is_alphabetical() {
        let content = "uses docker and pytest and ollama";
        let analysis = analyze_repository(&record(content));

        assert_eq!(analysis.frameworks, vec!["Docker", "Ollama", "pytest"]);
    }

    #[test]
    fn commit_extraction_parses_and_skips() {
        let content = "2024-01-15T10:30:00 then junk 9999-99-99T99:99:99 end";
        let analysis = analyze_repository(&record(content));

        assert_eq!(analysis.commits.len(), 1);
        assert_eq!(analysis.commits[0].date, "2024-01-15T10:30:00");
        assert_eq!(analysis.commits[0].timestamp, 1_705_314_600);
    }

    #[test]
    fn commit_extraction_caps_the_scan() {
        let mut content = String::new();
        for day in 0..28 {
            for hour in 0..5 {
                content.push_str(&format!("2024-03-{:02}T{:02}:00:00\n", day + 1, hour));
            }
        }
        let analysis = analyze_repository(&record(&content));

        assert_eq!(analysis.commits.len(), COMMIT_SCAN_CAP);
    }

    #[test]
    fn file_type_histogram_lowercases_and_caps() {
        let content = "a.PY b.py c.Md d.md e.md";
        let analysis = analyze_repository(&record(content));

        assert_eq!(analysis.file_types.get("py").copied(), Some(2));
        assert_eq!(analysis.file_types.get("md").copied(), Some(3));
        let first = analysis.file_types.keys().next().expect("first entry");
        assert_eq!(first, "md");
    }

    #[test]
    fn coverage_is_zero_without_code_files() {
        let analysis = analyze_repository(&record("README.md with assert mentions"));
        assert_eq!(analysis.test_coverage, 0.0);
    }

    #[test]
    fn coverage_is_capped_at_one_hundred() {
        let content = "app.py assert assert assert assert pytest testing test/ spec/";
        let analysis = analyze_repository(&record(content));
        assert!(analysis.test_coverage <= 100.0);
        assert!(analysis.test_coverage > 0.0);
    }

    #[test]
    fn size_is_rounded_kilobytes() {
        let analysis = analyze_repository(&record(&"x".repeat(1536)));
        assert_eq!(analysis.size_kb, 1.5);
    }

    #[test]
    fn empty_content_yields_empty_analysis() {
        let analysis = analyze_repository(&record(""));

        assert!(analysis.languages.is_empty());
        assert!(analysis.libraries.is_empty());
        assert!(analysis.frameworks.is_empty());
        assert!(analysis.commits.is_empty());
        assert!(analysis.file_types.is_empty());
        assert_eq!(analysis.size_kb, 0.0);
        assert_eq!(analysis.test_coverage, 0.0);
    }
}
