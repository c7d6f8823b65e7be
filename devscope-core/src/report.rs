//! Report formatting utilities for DevScope outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{
    FilteredProfile, PredictiveProfile, ProjectPrediction, TranslatedProfile,
};

/// Width of the score bars in text reports.
const SCORE_BAR_WIDTH: f64 = 20.0;
/// Library entries shown in the text summary; the JSON artifact keeps all.
const TEXT_LIBRARY_LIMIT: usize = 10;

/// Render any serializable artifact payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Render a filtered profile as a plain-text summary.
pub fn render_filtered_text(profile: &FilteredProfile) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Repositories: {}", profile.repositories.len());
    let _ = writeln!(output, "Total commits: {}", profile.total_commits);
    for repository in &profile.repositories {
        let _ = writeln!(
            output,
            "- {}: {:.2} KB, {} commits, {:.2}% test coverage",
            repository.name,
            repository.size_kb,
            repository.commits.len(),
            repository.test_coverage,
        );
    }
    output
}

/// Render a translated profile as a plain-text summary.
pub fn render_translated_text(profile: &TranslatedProfile) -> String {
    let mut output = String::new();

    if profile.languages.is_empty() {
        let _ = writeln!(output, "Languages: none detected");
    } else {
        let _ = writeln!(output, "Languages:");
        let mut shares: Vec<(&String, f64)> = profile
            .languages
            .iter()
            .map(|(language, share)| (language, *share))
            .collect();
        shares.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (language, share) in shares {
            let _ = writeln!(output, "- {language}: {share:.2}%");
        }
    }

    if !profile.libraries.is_empty() {
        let _ = writeln!(output, "Top libraries:");
        for (library, count) in profile.libraries.iter().take(TEXT_LIBRARY_LIMIT) {
            let _ = writeln!(output, "- {library}: {count}");
        }
    }

    if !profile.frameworks.is_empty() {
        let _ = writeln!(output, "Frameworks:");
        for (framework, count) in &profile.frameworks {
            let _ = writeln!(output, "- {framework}: {count}");
        }
    }

    let habits = &profile.habits;
    let _ = writeln!(output, "Commit pattern: {}", habits.commit_pattern);
    let _ = writeln!(
        output,
        "Commit frequency: {:.2}/week (consistency {:.3})",
        habits.frequency, habits.consistency
    );
    let _ = writeln!(
        output,
        "Technical level: {} (depth {:.3})",
        profile.technical_depth.level, profile.technical_depth.depth_score
    );
    let _ = writeln!(
        output,
        "Composition: frontend {:.3}, backend {:.3}, data {:.3}",
        profile.composition.frontend, profile.composition.backend, profile.composition.data
    );

    if profile.skills.is_empty() {
        let _ = writeln!(output, "Skills: none above the floor");
    } else {
        let _ = writeln!(output, "Skills:");
        for (skill, score) in &profile.skills {
            let _ = writeln!(output, "- {skill}: {score:.3}");
        }
    }

    let _ = writeln!(
        output,
        "Quality: {} ({:.2}% avg coverage)",
        profile.quality.rating, profile.quality.avg_test_coverage
    );

    output
}

/// Render a predictive profile as a plain-text summary with score bars.
pub fn render_predictive_text(profile: &PredictiveProfile) -> String {
    let mut output = String::new();

    append_scores(&mut output, "Skill vector", &profile.skill_vector.entries());
    let _ = writeln!(
        output,
        "  {:<28} {:.3} {}",
        "devtools (inferred)",
        profile.devtools_skill,
        score_bar(profile.devtools_skill)
    );
    append_scores(
        &mut output,
        "Code style",
        &profile.code_style_profile.entries(),
    );
    append_scores(
        &mut output,
        "Friction (lower is easier)",
        &profile.friction_profile.entries(),
    );
    append_scores(
        &mut output,
        "Capability assessment",
        &profile.capability_assessment.entries(),
    );

    if !profile.skill_gaps.is_empty() {
        let _ = writeln!(output, "Skill gaps:");
        for (skill, gap) in &profile.skill_gaps {
            let _ = writeln!(output, "- {skill}: gap of {gap:.3}");
        }
    }

    if !profile.learning_recommendations.is_empty() {
        let _ = writeln!(output, "Recommended learning path:");
        for recommendation in &profile.learning_recommendations {
            let _ = writeln!(
                output,
                "- {} ({} priority, friction {:.2}): {}",
                recommendation.area,
                recommendation.priority,
                recommendation.friction,
                recommendation.suggested_tech.join(", ")
            );
        }
    }

    output
}

/// Render a single project prediction as plain text.
pub fn render_prediction_text(prediction: &ProjectPrediction) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Project type: {}", prediction.project_type);
    let _ = writeln!(
        output,
        "Success likelihood: {:.3}",
        prediction.success_likelihood
    );
    let _ = writeln!(output, "Friction: {:.3}", prediction.friction_score);
    let _ = writeln!(output, "Risk: {}", prediction.risk_level);

    if prediction.tension_points.is_empty() {
        let _ = writeln!(output, "Tension points: none");
    } else {
        let _ = writeln!(output, "Tension points:");
        for tension in &prediction.tension_points {
            let _ = writeln!(output, "- {tension}");
        }
    }

    if !prediction.skill_gaps.is_empty() {
        let _ = writeln!(output, "Skill gaps:");
        for gap in &prediction.skill_gaps {
            let _ = writeln!(output, "- {gap}");
        }
    }

    output
}

fn append_scores(output: &mut String, title: &str, entries: &[(&str, f64)]) {
    let _ = writeln!(output, "{title}:");
    for (name, score) in entries {
        let _ = writeln!(output, "  {name:<28} {score:.3} {}", score_bar(*score));
    }
}

fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * SCORE_BAR_WIDTH) as usize;
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_filtered_profile;
    use crate::domain::{ProjectType, RepositoryAnalysis};
    use crate::model::{generate_predictive_profile, predict_project_success};
    use crate::translator::translate_at;
    use indexmap::IndexMap;

    const STAMP: &str = "2024-06-01T00:00:00+00:00";

    fn sample_translated() -> crate::domain::TranslatedProfile {
        let mut repository = RepositoryAnalysis {
            name: "demo".to_string(),
            ..RepositoryAnalysis::default()
        };
        repository.languages = IndexMap::from([("Python".to_string(), 10u64)]);
        repository.libraries = IndexMap::from([("flask".to_string(), 4u64)]);
        repository.frameworks = vec!["Docker".to_string()];
        repository.size_kb = 256.0;
        repository.test_coverage = 50.0;
        translate_at(&build_filtered_profile(vec![repository]), STAMP)
    }

    #[test]
    fn renders_json_payload() {
        let translated = sample_translated();
        let json = render_json(&translated).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["languages"]["Python"], 100.0);
        assert_eq!(parsed["quality"]["rating"], "good");
    }

    #[test]
    fn renders_filtered_text() {
        let repository = RepositoryAnalysis {
            name: "demo".to_string(),
            size_kb: 12.5,
            ..RepositoryAnalysis::default()
        };
        let output = render_filtered_text(&build_filtered_profile(vec![repository]));

        assert!(output.contains("Repositories: 1"));
        assert!(output.contains("demo: 12.50 KB"));
    }

    #[test]
    fn renders_translated_text() {
        let output = render_translated_text(&sample_translated());

        assert!(output.contains("- Python: 100.00%"));
        assert!(output.contains("- flask: 4"));
        assert!(output.contains("Commit pattern: sporadic"));
        assert!(output.contains("Quality: good"));
    }

    #[test]
    fn renders_empty_translated_text() {
        let translated = translate_at(&build_filtered_profile(Vec::new()), STAMP);
        let output = render_translated_text(&translated);

        assert!(output.contains("Languages: none detected"));
        assert!(output.contains("Skills: none above the floor"));
    }

    #[test]
    fn renders_predictive_text() {
        let predictive = generate_predictive_profile(&sample_translated());
        let output = render_predictive_text(&predictive);

        assert!(output.contains("Skill vector:"));
        assert!(output.contains("backend"));
        assert!(output.contains("devtools (inferred)"));
        assert!(output.contains("Friction (lower is easier):"));
    }

    #[test]
    fn renders_prediction_text() {
        let prediction =
            predict_project_success(ProjectType::MlModel, &sample_translated());
        let output = render_prediction_text(&prediction);

        assert!(output.contains("Project type: ml_model"));
        assert!(output.contains("Risk: high"));
        assert!(output.contains("Tension points:"));
    }
}
