//! Filtered-profile assembly: per-repository analyses plus the merged
//! commit history for one dump.

use crate::analyzer::analyze_repository;
use crate::domain::{FilteredProfile, RepositoryAnalysis};
use crate::parser::parse_dump;

/// Combine per-repository analyses, in input order, into a filtered profile.
///
/// Commit dates from every repository merge into one ascending list;
/// `total_commits` counts every extracted commit. Zero repositories is a
/// normal degenerate case and yields the empty profile.
pub fn build_filtered_profile(repositories: Vec<RepositoryAnalysis>) -> FilteredProfile {
    let total_commits = repositories
        .iter()
        .map(|repository| repository.commits.len() as u64)
        .sum();

    let mut commit_dates: Vec<String> = repositories
        .iter()
        .flat_map(|repository| repository.commits.iter())
        .filter(|commit| !commit.date.is_empty())
        .map(|commit| commit.date.clone())
        .collect();
    commit_dates.sort();

    FilteredProfile {
        repositories,
        total_commits,
        commit_dates,
    }
}

/// Run the parse and analysis stages over a raw dump in one step.
pub fn build_from_dump(text: &str) -> FilteredProfile {
    let analyses = parse_dump(text)
        .iter()
        .map(analyze_repository)
        .collect();
    build_filtered_profile(analyses)
}

#[cfg(test)]
mod tests {
    use super::{build_filtered_profile, build_from_dump};
    use crate::domain::{CommitStamp, RepositoryAnalysis};

    fn analysis_with_dates(name: &str, dates: &[&str]) -> RepositoryAnalysis {
        RepositoryAnalysis {
            name: name.to_string(),
            commits: dates
                .iter()
                .map(|date| CommitStamp {
                    date: (*date).to_string(),
                    timestamp: 0,
                })
                .collect(),
            ..RepositoryAnalysis::default()
        }
    }

    #[test]
    fn merges_commit_dates_ascending() {
        let profile = build_filtered_profile(vec![
            analysis_with_dates("beta", &["2024-02-01T00:00:00", "2023-12-01T00:00:00"]),
            analysis_with_dates("alpha", &["2024-01-01T00:00:00"]),
        ]);

        assert_eq!(profile.total_commits, 3);
        assert_eq!(
            profile.commit_dates,
            vec![
                "2023-12-01T00:00:00",
                "2024-01-01T00:00:00",
                "2024-02-01T00:00:00",
            ]
        );
        // Repository order is preserved as given.
        assert_eq!(profile.repositories[0].name, "beta");
    }

    #[test]
    fn empty_input_yields_empty_profile() {
        let profile = build_filtered_profile(Vec::new());

        assert!(profile.repositories.is_empty());
        assert_eq!(profile.total_commits, 0);
        assert!(profile.commit_dates.is_empty());
    }

    #[test]
    fn builds_from_raw_dump_text() {
        let banner = "=".repeat(80);
        let dump = format!(
            "header\n{banner}\nREPOSITORY: demo\n{banner}\n\nFILE: app.py\n2024-01-15T10:30:00\n"
        );

        let profile = build_from_dump(&dump);

        assert_eq!(profile.repositories.len(), 1);
        assert_eq!(profile.repositories[0].name, "demo");
        assert_eq!(profile.total_commits, 1);
        assert_eq!(profile.commit_dates, vec!["2024-01-15T10:30:00"]);
    }
}
