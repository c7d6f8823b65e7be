//! Developer-profile translation.
//!
//! Aggregates a filtered profile into normalized percentages, ranked lists,
//! habit and quality metrics, and coarse skill scores. Every aggregation
//! over an empty collection yields its documented zero value; nothing here
//! can fail.

use std::collections::BTreeSet;

use chrono::Utc;
use indexmap::IndexMap;

use crate::domain::{
    CommitHabits, CommitPattern, Composition, DepthLevel, FilteredProfile, ProfileMetadata,
    QualityRating, QualityReport, RepositoryAnalysis, TechnicalDepth, TranslatedProfile, round2,
    round3,
};

/// Commits per week above which the cadence counts as daily (exclusive).
pub const DAILY_FREQUENCY_CUTOFF: f64 = 5.0;
/// Commits per week above which the cadence counts as regular (exclusive).
pub const REGULAR_FREQUENCY_CUTOFF: f64 = 2.0;
/// Commits per week above which the cadence counts as weekly (exclusive).
pub const WEEKLY_FREQUENCY_CUTOFF: f64 = 0.5;

/// Mean repository size, in kilobytes, that maps to a depth score of 1.0.
pub const DEPTH_SIZE_DIVISOR_KB: f64 = 500.0;
/// Depth score above which the developer classifies as advanced.
pub const ADVANCED_DEPTH_CUTOFF: f64 = 0.7;
/// Depth score above which the developer classifies as intermediate.
pub const INTERMEDIATE_DEPTH_CUTOFF: f64 = 0.4;

/// Average coverage above which the rating is excellent.
pub const EXCELLENT_COVERAGE_CUTOFF: f64 = 70.0;
/// Average coverage above which the rating is good.
pub const GOOD_COVERAGE_CUTOFF: f64 = 40.0;
/// Average coverage above which the rating is fair.
pub const FAIR_COVERAGE_CUTOFF: f64 = 20.0;

/// Skill scores at or below this floor are dropped from the profile.
pub const SKILL_SCORE_FLOOR: f64 = 0.05;

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_WEEK: f64 = 604_800.0;
const PERCENT_SCALE: f64 = 100.0;

/// File types bucketed as frontend work.
const FRONTEND_FILE_TYPES: &[&str] = &["html", "css", "scss", "sass", "jsx", "tsx", "vue", "md"];
/// File types bucketed as backend work. Overlaps with the data bucket.
const BACKEND_FILE_TYPES: &[&str] = &["py", "sh", "js", "ts", "json", "yml", "yaml"];
/// File types bucketed as data work.
const DATA_FILE_TYPES: &[&str] = &["json", "csv", "xml"];

/// Indicator names for developer-tooling and automation skill.
const DEVTOOLS_INDICATORS: &[&str] =
    &["pytest", "git", "github", "docker", "validation", "scaffold"];
/// Indicator names for AI/ML skill.
const AI_ML_INDICATORS: &[&str] = &["ollama", "claude", "llm", "ai", "ml"];
/// Indicator names for plugin and extension development skill.
const PLUGIN_INDICATORS: &[&str] = &["plugin", "marketplace", "cli", "tools"];

/// Translate a filtered profile, stamping the current wall-clock time into
/// the metadata.
pub fn translate(profile: &FilteredProfile) -> TranslatedProfile {
    translate_at(profile, &Utc::now().to_rfc3339())
}

/// Translate a filtered profile with an explicit analysis timestamp.
///
/// Apart from the metadata timestamp the translation is a pure function of
/// its input; callers that need reproducible output inject the timestamp.
pub fn translate_at(profile: &FilteredProfile, analysis_timestamp: &str) -> TranslatedProfile {
    let repositories = &profile.repositories;
    TranslatedProfile {
        languages: aggregate_languages(repositories),
        libraries: aggregate_libraries(repositories),
        frameworks: aggregate_frameworks(repositories),
        habits: commit_habits(repositories),
        technical_depth: technical_depth(repositories),
        composition: composition(repositories),
        skills: skill_signals(repositories),
        quality: quality(repositories),
        metadata: ProfileMetadata {
            total_repositories: repositories.len(),
            total_commits: profile.total_commits,
            analysis_timestamp: analysis_timestamp.to_string(),
        },
    }
}

fn aggregate_languages(repositories: &[RepositoryAnalysis]) -> IndexMap<String, f64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for repository in repositories {
        for (language, count) in &repository.languages {
            *counts.entry(language.clone()).or_insert(0) += count;
        }
    }

    let total: u64 = counts.values().sum();
    if total == 0 {
        return IndexMap::new();
    }

    counts
        .into_iter()
        .map(|(language, count)| {
            (
                language,
                round2(count as f64 / total as f64 * PERCENT_SCALE),
            )
        })
        .collect()
}

fn aggregate_libraries(repositories: &[RepositoryAnalysis]) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for repository in repositories {
        for (library, count) in &repository.libraries {
            *counts.entry(library.clone()).or_insert(0) += count;
        }
    }
    sort_descending(counts)
}

fn aggregate_frameworks(repositories: &[RepositoryAnalysis]) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for repository in repositories {
        for framework in &repository.frameworks {
            *counts.entry(framework.clone()).or_insert(0) += 1;
        }
    }
    sort_descending(counts)
}

fn commit_habits(repositories: &[RepositoryAnalysis]) -> CommitHabits {
    let timestamps: Vec<i64> = repositories
        .iter()
        .flat_map(|repository| repository.commits.iter())
        .map(|commit| commit.timestamp)
        .collect();

    let frequency = commit_frequency(&timestamps);
    CommitHabits {
        frequency: round2(frequency),
        consistency: round3(commit_consistency(&timestamps)),
        avg_commit_size_kb: round2(avg_commit_size(repositories)),
        commit_pattern: classify_frequency(frequency),
    }
}

/// Commits per week over the observed timespan. Fewer than two timestamps,
/// or a zero-length timespan, yields 0.
fn commit_frequency(timestamps: &[i64]) -> f64 {
    if timestamps.len() < 2 {
        return 0.0;
    }
    let (Some(&first), Some(&last)) = (timestamps.iter().min(), timestamps.iter().max()) else {
        return 0.0;
    };
    let span_seconds = (last - first) as f64;
    if span_seconds <= 0.0 {
        return 0.0;
    }
    let weeks = span_seconds / SECONDS_PER_WEEK;
    timestamps.len() as f64 / weeks.max(1.0)
}

/// Cadence regularity: 1 / (1 + stdev of inter-commit gaps in days).
/// Requires at least three timestamps, in extraction order.
fn commit_consistency(timestamps: &[i64]) -> f64 {
    if timestamps.len() < 3 {
        return 0.0;
    }
    let intervals: Vec<f64> = timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .collect();
    let stdev_days = sample_stdev(&intervals) / SECONDS_PER_DAY;
    1.0 / (1.0 + stdev_days)
}

/// Sample standard deviation (Bessel-corrected, n-1 denominator), matching
/// Python's `statistics.stdev`. Returns 0.0 for fewer than two values.
fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Commit-weighted mean of per-repository size per commit.
fn avg_commit_size(repositories: &[RepositoryAnalysis]) -> f64 {
    let mut weighted_size = 0.0;
    let mut commit_count = 0u64;
    for repository in repositories {
        let commits = repository.commits.len() as u64;
        if commits > 0 {
            weighted_size += repository.size_kb;
            commit_count += commits;
        }
    }
    if commit_count == 0 {
        0.0
    } else {
        weighted_size / commit_count as f64
    }
}

fn technical_depth(repositories: &[RepositoryAnalysis]) -> TechnicalDepth {
    if repositories.is_empty() {
        return TechnicalDepth::default();
    }

    let sizes: Vec<f64> = repositories
        .iter()
        .map(|repository| repository.size_kb)
        .collect();
    let avg_size = sizes.iter().sum::<f64>() / sizes.len() as f64;
    let max_size = sizes.iter().copied().fold(0.0, f64::max);
    let depth_score = (avg_size / DEPTH_SIZE_DIVISOR_KB).min(1.0);

    TechnicalDepth {
        depth_score: round3(depth_score),
        avg_repo_size: round2(avg_size),
        max_repo_size: round2(max_size),
        level: classify_depth(depth_score),
    }
}

fn composition(repositories: &[RepositoryAnalysis]) -> Composition {
    let mut frontend = 0u64;
    let mut backend = 0u64;
    let mut data = 0u64;

    for repository in repositories {
        for (file_type, count) in &repository.file_types {
            if FRONTEND_FILE_TYPES.contains(&file_type.as_str()) {
                frontend += count;
            }
            if BACKEND_FILE_TYPES.contains(&file_type.as_str()) {
                backend += count;
            }
            if DATA_FILE_TYPES.contains(&file_type.as_str()) {
                data += count;
            }
        }
    }

    let total = frontend + backend + data;
    if total == 0 {
        return Composition::default();
    }

    Composition {
        frontend: round3(frontend as f64 / total as f64),
        backend: round3(backend as f64 / total as f64),
        data: round3(data as f64 / total as f64),
    }
}

fn skill_signals(repositories: &[RepositoryAnalysis]) -> IndexMap<String, f64> {
    let mut combined: BTreeSet<String> = BTreeSet::new();
    for repository in repositories {
        combined.extend(repository.libraries.keys().map(|name| name.to_lowercase()));
        combined.extend(
            repository
                .frameworks
                .iter()
                .map(|name| name.to_lowercase()),
        );
    }

    let indicator_sets: [(&str, &[&str]); 3] = [
        ("devtools_automation", DEVTOOLS_INDICATORS),
        ("ai_ml", AI_ML_INDICATORS),
        ("plugin_development", PLUGIN_INDICATORS),
    ];

    let mut skills = IndexMap::new();
    for (name, indicators) in indicator_sets {
        let hits = indicators
            .iter()
            .filter(|indicator| combined.contains(**indicator))
            .count();
        let score = round3(hits as f64 / indicators.len() as f64);
        if score > SKILL_SCORE_FLOOR {
            skills.insert(name.to_string(), score);
        }
    }
    skills
}

fn quality(repositories: &[RepositoryAnalysis]) -> QualityReport {
    if repositories.is_empty() {
        return QualityReport::default();
    }

    let avg_coverage = repositories
        .iter()
        .map(|repository| repository.test_coverage)
        .sum::<f64>()
        / repositories.len() as f64;

    QualityReport {
        avg_test_coverage: round2(avg_coverage),
        quality_score: round3((avg_coverage / 100.0).min(1.0)),
        rating: classify_coverage(avg_coverage),
    }
}

fn classify_frequency(frequency: f64) -> CommitPattern {
    if frequency > DAILY_FREQUENCY_CUTOFF {
        CommitPattern::Daily
    } else if frequency > REGULAR_FREQUENCY_CUTOFF {
        CommitPattern::Regular
    } else if frequency > WEEKLY_FREQUENCY_CUTOFF {
        CommitPattern::Weekly
    } else {
        CommitPattern::Sporadic
    }
}

fn classify_depth(depth_score: f64) -> DepthLevel {
    if depth_score > ADVANCED_DEPTH_CUTOFF {
        DepthLevel::Advanced
    } else if depth_score > INTERMEDIATE_DEPTH_CUTOFF {
        DepthLevel::Intermediate
    } else {
        DepthLevel::Beginner
    }
}

fn classify_coverage(avg_coverage: f64) -> QualityRating {
    if avg_coverage > EXCELLENT_COVERAGE_CUTOFF {
        QualityRating::Excellent
    } else if avg_coverage > GOOD_COVERAGE_CUTOFF {
        QualityRating::Good
    } else if avg_coverage > FAIR_COVERAGE_CUTOFF {
        QualityRating::Fair
    } else {
        QualityRating::NeedsImprovement
    }
}

/// Stable descending sort by count; equal counts keep first-encountered
/// order.
fn sort_descending(counts: IndexMap<String, u64>) -> IndexMap<String, u64> {
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CommitStamp, FilteredProfile, RepositoryAnalysis};
    use indexmap::IndexMap;

    const STAMP: &str = "2024-06-01T00:00:00+00:00";

    fn repo(name: &str) -> RepositoryAnalysis {
        RepositoryAnalysis {
            name: name.to_string(),
            ..RepositoryAnalysis::default()
        }
    }

    fn commits(timestamps: &[i64]) -> Vec<CommitStamp> {
        timestamps
            .iter()
            .map(|timestamp| CommitStamp {
                date: format!("stamp-{timestamp}"),
                timestamp: *timestamp,
            })
            .collect()
    }

    fn profile(repositories: Vec<RepositoryAnalysis>) -> FilteredProfile {
        let total_commits = repositories
            .iter()
            .map(|repository| repository.commits.len() as u64)
            .sum();
        FilteredProfile {
            repositories,
            total_commits,
            commit_dates: Vec::new(),
        }
    }

    #[test]
    fn language_percentages_sum_to_one_hundred() {
        let mut first = repo("first");
        first.languages = IndexMap::from([
            ("Python".to_string(), 6u64),
            ("JavaScript".to_string(), 3u64),
        ]);
        let mut second = repo("second");
        second.languages = IndexMap::from([("Python".to_string(), 1u64)]);

        let translated = translate_at(&profile(vec![first, second]), STAMP);

        let total: f64 = translated.languages.values().sum();
        assert!((total - 100.0).abs() < 0.1);
        assert_eq!(translated.languages.get("Python").copied(), Some(70.0));
    }

    #[test]
    fn empty_profile_translates_to_zero_defaults() {
        let translated = translate_at(&profile(Vec::new()), STAMP);

        assert!(translated.languages.is_empty());
        assert!(translated.libraries.is_empty());
        assert!(translated.frameworks.is_empty());
        assert_eq!(translated.habits.frequency, 0.0);
        assert_eq!(translated.habits.consistency, 0.0);
        assert_eq!(translated.habits.commit_pattern, CommitPattern::Sporadic);
        assert_eq!(translated.technical_depth.depth_score, 0.0);
        assert_eq!(translated.technical_depth.level, DepthLevel::Beginner);
        assert_eq!(translated.composition, Composition::default());
        assert!(translated.skills.is_empty());
        assert_eq!(translated.quality.rating, QualityRating::NeedsImprovement);
        assert_eq!(translated.metadata.total_repositories, 0);
    }

    #[test]
    fn translation_is_deterministic_given_a_timestamp() {
        let mut sample = repo("sample");
        sample.languages = IndexMap::from([("Python".to_string(), 4u64)]);
        sample.commits = commits(&[0, 604_800, 1_209_600]);
        sample.size_kb = 300.0;
        let input = profile(vec![sample]);

        let first = translate_at(&input, STAMP);
        let second = translate_at(&input, STAMP);

        assert_eq!(first, second);
    }

    #[test]
    fn frequency_counts_commits_per_week() {
        // Three commits spread over exactly two weeks.
        let mut sample = repo("sample");
        sample.commits = commits(&[0, 604_800, 1_209_600]);

        let translated = translate_at(&profile(vec![sample]), STAMP);

        assert_eq!(translated.habits.frequency, 1.5);
        // Perfectly even cadence has zero deviation.
        assert_eq!(translated.habits.consistency, 1.0);
    }

    #[test]
    fn frequency_is_zero_for_degenerate_timelines() {
        assert_eq!(commit_frequency(&[]), 0.0);
        assert_eq!(commit_frequency(&[1_000]), 0.0);
        assert_eq!(commit_frequency(&[1_000, 1_000]), 0.0);
    }

    #[test]
    fn consistency_requires_three_timestamps() {
        assert_eq!(commit_consistency(&[0, 604_800]), 0.0);
        assert!(commit_consistency(&[0, 604_800, 1_209_600]) > 0.0);
    }

    #[test]
    fn commit_pattern_boundaries_are_exclusive() {
        assert_eq!(classify_frequency(5.1), CommitPattern::Daily);
        assert_eq!(classify_frequency(5.0), CommitPattern::Regular);
        assert_eq!(classify_frequency(2.0), CommitPattern::Weekly);
        assert_eq!(classify_frequency(0.5), CommitPattern::Sporadic);
        assert_eq!(classify_frequency(0.0), CommitPattern::Sporadic);
    }

    #[test]
    fn avg_commit_size_is_commit_weighted() {
        let mut small = repo("small");
        small.size_kb = 10.0;
        small.commits = commits(&[1, 2]);
        let mut large = repo("large");
        large.size_kb = 90.0;
        large.commits = commits(&[3, 4, 5, 6, 7, 8, 9, 10]);
        let mut silent = repo("silent");
        silent.size_kb = 500.0;

        let translated = translate_at(&profile(vec![small, large, silent]), STAMP);

        // (10 + 90) kb over 10 commits; the commitless repository is ignored.
        assert_eq!(translated.habits.avg_commit_size_kb, 10.0);
    }

    #[test]
    fn depth_level_boundaries_are_exclusive() {
        assert_eq!(classify_depth(0.7), DepthLevel::Intermediate);
        assert_eq!(classify_depth(0.71), DepthLevel::Advanced);
        assert_eq!(classify_depth(0.4), DepthLevel::Beginner);
        assert_eq!(classify_depth(0.41), DepthLevel::Intermediate);
    }

    #[test]
    fn depth_score_saturates_at_one() {
        let mut big = repo("big");
        big.size_kb = 5_000.0;

        let translated = translate_at(&profile(vec![big]), STAMP);

        assert_eq!(translated.technical_depth.depth_score, 1.0);
        assert_eq!(translated.technical_depth.level, DepthLevel::Advanced);
        assert_eq!(translated.technical_depth.max_repo_size, 5_000.0);
    }

    #[test]
    fn composition_buckets_overlap_on_json() {
        let mut sample = repo("sample");
        sample.file_types = IndexMap::from([("json".to_string(), 4u64)]);

        let translated = translate_at(&profile(vec![sample]), STAMP);

        // json lands in both backend and data, so the split is 0.5 / 0.5.
        assert_eq!(translated.composition.frontend, 0.0);
        assert_eq!(translated.composition.backend, 0.5);
        assert_eq!(translated.composition.data, 0.5);
    }

    #[test]
    fn skills_drop_scores_at_or_below_the_floor() {
        let mut sample = repo("sample");
        sample.libraries = IndexMap::from([("pytest".to_string(), 3u64)]);
        sample.frameworks = vec!["Docker".to_string()];

        let translated = translate_at(&profile(vec![sample]), STAMP);

        // pytest + docker hit 2 of 6 devtools indicators.
        assert_eq!(
            translated.skills.get("devtools_automation").copied(),
            Some(0.333)
        );
        assert!(!translated.skills.contains_key("ai_ml"));
        assert!(!translated.skills.contains_key("plugin_development"));
    }

    #[test]
    fn quality_rating_boundaries_are_exclusive() {
        assert_eq!(classify_coverage(70.0), QualityRating::Good);
        assert_eq!(classify_coverage(70.1), QualityRating::Excellent);
        assert_eq!(classify_coverage(40.0), QualityRating::Fair);
        assert_eq!(classify_coverage(20.0), QualityRating::NeedsImprovement);
    }

    #[test]
    fn library_ranking_is_stable_on_ties() {
        let mut first = repo("first");
        first.libraries = IndexMap::from([
            ("alpha".to_string(), 2u64),
            ("beta".to_string(), 2u64),
        ]);
        let mut second = repo("second");
        second.libraries = IndexMap::from([("gamma".to_string(), 5u64)]);

        let translated = translate_at(&profile(vec![first, second]), STAMP);

        let keys: Vec<&String> = translated.libraries.keys().collect();
        assert_eq!(keys, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn metadata_carries_counts_and_timestamp() {
        let mut sample = repo("sample");
        sample.commits = commits(&[10, 20]);

        let translated = translate_at(&profile(vec![sample]), STAMP);

        assert_eq!(translated.metadata.total_repositories, 1);
        assert_eq!(translated.metadata.total_commits, 2);
        assert_eq!(translated.metadata.analysis_timestamp, STAMP);
    }
}
