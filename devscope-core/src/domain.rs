//! Domain entities for DevScope.
//!
//! Every structure that crosses an artifact boundary carries
//! `#[serde(default)]` so that documents written by older runs (or trimmed by
//! the persistence collaborator) deserialize with documented defaults instead
//! of failing on a missing field.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// One repository section split out of a raw dump: name plus raw content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RepositoryRecord {
    /// Repository name as announced by the section marker.
    pub name: String,
    /// Raw section content, file markers included.
    pub content: String,
}

/// A commit timestamp extracted from repository content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CommitStamp {
    /// The ISO-8601 date-time substring as it appeared in the dump.
    pub date: String,
    /// Epoch seconds, naive date-times interpreted as UTC.
    pub timestamp: i64,
}

/// Heuristic signals extracted from a single repository section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RepositoryAnalysis {
    /// Repository name.
    pub name: String,
    /// Detected languages mapped to occurrence counts; zero-match languages
    /// are omitted.
    pub languages: IndexMap<String, u64>,
    /// Detected libraries mapped to occurrence counts, at most 30 entries,
    /// descending by count with first-encountered tie order.
    pub libraries: IndexMap<String, u64>,
    /// Detected frameworks, alphabetically sorted.
    pub frameworks: Vec<String>,
    /// Commit timestamps in extraction order, at most 100.
    pub commits: Vec<CommitStamp>,
    /// Section content size in kilobytes, 2 decimals.
    pub size_kb: f64,
    /// File-extension histogram, at most 20 entries, descending by count.
    pub file_types: IndexMap<String, u64>,
    /// Estimated test coverage in [0, 100].
    pub test_coverage: f64,
}

/// Per-repository analyses plus the merged commit history for one dump.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FilteredProfile {
    /// Analyses in dump order.
    pub repositories: Vec<RepositoryAnalysis>,
    /// Total commit count across all repositories.
    pub total_commits: u64,
    /// Every commit date across repositories, sorted ascending.
    pub commit_dates: Vec<String>,
}

/// Commit cadence classification derived from commit frequency.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CommitPattern {
    /// More than five commits per week.
    Daily,
    /// More than two commits per week.
    Regular,
    /// More than half a commit per week.
    Weekly,
    /// Anything slower, including no datable commits at all.
    #[default]
    Sporadic,
}

impl fmt::Display for CommitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "daily",
            Self::Regular => "regular",
            Self::Weekly => "weekly",
            Self::Sporadic => "sporadic",
        };
        write!(f, "{label}")
    }
}

/// Commit habit metrics for one developer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CommitHabits {
    /// Commits per week over the observed timespan; 0 when undatable.
    pub frequency: f64,
    /// Cadence regularity in (0, 1]; higher is more regular; 0 when fewer
    /// than three timestamps exist.
    pub consistency: f64,
    /// Commit-weighted mean of per-repository size per commit.
    pub avg_commit_size_kb: f64,
    /// Coarse cadence classification.
    pub commit_pattern: CommitPattern,
}

/// Experience level classification derived from the depth score.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DepthLevel {
    /// Depth score above 0.7.
    Advanced,
    /// Depth score above 0.4.
    Intermediate,
    /// Everything below.
    #[default]
    Beginner,
}

impl fmt::Display for DepthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Advanced => "advanced",
            Self::Intermediate => "intermediate",
            Self::Beginner => "beginner",
        };
        write!(f, "{label}")
    }
}

/// Repository size statistics and the derived depth score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TechnicalDepth {
    /// Mean repository size normalized into [0, 1].
    pub depth_score: f64,
    /// Mean repository size in kilobytes.
    pub avg_repo_size: f64,
    /// Largest repository size in kilobytes.
    pub max_repo_size: f64,
    /// Coarse experience classification.
    pub level: DepthLevel,
}

/// Frontend/backend/data split of the developer's file types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Composition {
    /// Fraction of bucketed files in the frontend set.
    pub frontend: f64,
    /// Fraction of bucketed files in the backend set.
    pub backend: f64,
    /// Fraction of bucketed files in the data set.
    pub data: f64,
}

/// Test-discipline rating derived from average coverage.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    /// Average coverage above 70.
    Excellent,
    /// Average coverage above 40.
    Good,
    /// Average coverage above 20.
    Fair,
    /// Everything below.
    #[default]
    NeedsImprovement,
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsImprovement => "needs_improvement",
        };
        write!(f, "{label}")
    }
}

/// Aggregate test-coverage quality metrics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct QualityReport {
    /// Mean per-repository coverage estimate in [0, 100].
    pub avg_test_coverage: f64,
    /// Coverage normalized into [0, 1].
    pub quality_score: f64,
    /// Coarse rating.
    pub rating: QualityRating,
}

/// Bookkeeping attached to a translated profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileMetadata {
    /// Number of repositories the profile was derived from.
    pub total_repositories: usize,
    /// Total commits across those repositories.
    pub total_commits: u64,
    /// Wall-clock RFC 3339 timestamp of the translation run. Excluded from
    /// equality-style comparisons by convention.
    pub analysis_timestamp: String,
}

/// The normalized, percentage/ratio-based developer summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TranslatedProfile {
    /// Language usage as percentages of the grand total; sums to ~100 when
    /// non-empty.
    pub languages: IndexMap<String, f64>,
    /// Library usage counts, descending, stable ties.
    pub libraries: IndexMap<String, u64>,
    /// Framework usage counts (repositories using each), descending.
    pub frameworks: IndexMap<String, u64>,
    /// Commit habit metrics.
    pub habits: CommitHabits,
    /// Size-derived depth metrics.
    pub technical_depth: TechnicalDepth,
    /// Frontend/backend/data composition fractions.
    pub composition: Composition,
    /// Indicator-set skill scores; entries at or below the floor are dropped.
    pub skills: IndexMap<String, f64>,
    /// Test-coverage quality metrics.
    pub quality: QualityReport,
    /// Run bookkeeping.
    pub metadata: ProfileMetadata,
}

/// Normalized skill scores across six domains, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SkillVector {
    /// Server-side development.
    pub backend: f64,
    /// Browser-side development.
    pub frontend: f64,
    /// Data handling and processing.
    pub data: f64,
    /// AI and machine-learning work.
    pub ai_ml: f64,
    /// Cloud and infrastructure operations.
    pub cloud_infrastructure: f64,
    /// Architectural experience inferred from depth and quality.
    pub architecture: f64,
}

impl SkillVector {
    /// Dimension names paired with their scores, in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("backend", self.backend),
            ("frontend", self.frontend),
            ("data", self.data),
            ("ai_ml", self.ai_ml),
            ("cloud_infrastructure", self.cloud_infrastructure),
            ("architecture", self.architecture),
        ]
    }
}

/// Code style and approach inferred from language and library choices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CodeStyleProfile {
    /// Preference for typed languages and typing libraries.
    pub type_safety_preference: f64,
    /// 0 leans functional, 1 leans object-oriented.
    pub functional_vs_oop: f64,
    /// Polyglot tendency, language count normalized into [0, 1].
    pub language_diversity: f64,
    /// Comfort with large codebases, mirrors the depth score.
    pub complexity_tolerance: f64,
}

impl CodeStyleProfile {
    /// Trait names paired with their scores, in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("type_safety_preference", self.type_safety_preference),
            ("functional_vs_oop", self.functional_vs_oop),
            ("language_diversity", self.language_diversity),
            ("complexity_tolerance", self.complexity_tolerance),
        ]
    }
}

/// Friction scores for adopting specific technologies; lower means an easier
/// ramp-up. All scores in [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FrictionProfile {
    /// React adoption friction.
    pub react_friction: f64,
    /// Vue adoption friction.
    pub vue_friction: f64,
    /// TypeScript adoption friction.
    pub typescript_friction: f64,
    /// Typed-Python adoption friction.
    pub python_typing_friction: f64,
    /// ML project friction.
    pub ml_project_friction: f64,
    /// DevOps tooling friction.
    pub devops_friction: f64,
    /// Microservice architecture friction.
    pub microservices_friction: f64,
    /// Fullstack development friction.
    pub fullstack_friction: f64,
    /// Mobile development friction.
    pub mobile_friction: f64,
}

impl FrictionProfile {
    /// Technology names paired with their friction scores.
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("react_friction", self.react_friction),
            ("vue_friction", self.vue_friction),
            ("typescript_friction", self.typescript_friction),
            ("python_typing_friction", self.python_typing_friction),
            ("ml_project_friction", self.ml_project_friction),
            ("devops_friction", self.devops_friction),
            ("microservices_friction", self.microservices_friction),
            ("fullstack_friction", self.fullstack_friction),
            ("mobile_friction", self.mobile_friction),
        ]
    }
}

/// Success-likelihood scores per project type, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CapabilityAssessment {
    /// HTTP API service.
    pub api_service: f64,
    /// Command-line tool.
    pub cli_tool: f64,
    /// Data pipeline.
    pub data_pipeline: f64,
    /// Machine-learning model.
    pub ml_model: f64,
    /// Frontend application.
    pub frontend_app: f64,
    /// Fullstack application.
    pub fullstack_app: f64,
    /// Infrastructure project.
    pub infrastructure: f64,
    /// Plugin or extension system.
    pub plugin_system: f64,
}

impl CapabilityAssessment {
    /// Project-type names paired with their scores.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("api_service", self.api_service),
            ("cli_tool", self.cli_tool),
            ("data_pipeline", self.data_pipeline),
            ("ml_model", self.ml_model),
            ("frontend_app", self.frontend_app),
            ("fullstack_app", self.fullstack_app),
            ("infrastructure", self.infrastructure),
            ("plugin_system", self.plugin_system),
        ]
    }

    /// Score for one project type.
    pub fn score(&self, project_type: ProjectType) -> f64 {
        match project_type {
            ProjectType::ApiService => self.api_service,
            ProjectType::CliTool => self.cli_tool,
            ProjectType::DataPipeline => self.data_pipeline,
            ProjectType::MlModel => self.ml_model,
            ProjectType::FrontendApp => self.frontend_app,
            ProjectType::FullstackApp => self.fullstack_app,
            ProjectType::Infrastructure => self.infrastructure,
            ProjectType::PluginSystem => self.plugin_system,
        }
    }
}

/// The project types the capability assessment covers.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// HTTP API service.
    ApiService,
    /// Command-line tool.
    CliTool,
    /// Data pipeline.
    DataPipeline,
    /// Machine-learning model.
    MlModel,
    /// Frontend application.
    FrontendApp,
    /// Fullstack application.
    FullstackApp,
    /// Infrastructure project.
    Infrastructure,
    /// Plugin or extension system.
    PluginSystem,
}

impl ProjectType {
    /// Parse a project-type tag; returns `None` for unknown tags.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "api_service" => Some(Self::ApiService),
            "cli_tool" => Some(Self::CliTool),
            "data_pipeline" => Some(Self::DataPipeline),
            "ml_model" => Some(Self::MlModel),
            "frontend_app" => Some(Self::FrontendApp),
            "fullstack_app" => Some(Self::FullstackApp),
            "infrastructure" => Some(Self::Infrastructure),
            "plugin_system" => Some(Self::PluginSystem),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ApiService => "api_service",
            Self::CliTool => "cli_tool",
            Self::DataPipeline => "data_pipeline",
            Self::MlModel => "ml_model",
            Self::FrontendApp => "frontend_app",
            Self::FullstackApp => "fullstack_app",
            Self::Infrastructure => "infrastructure",
            Self::PluginSystem => "plugin_system",
        };
        write!(f, "{label}")
    }
}

/// Priority tier attached to a learning recommendation.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Pursue first.
    High,
    /// Pursue when convenient.
    #[default]
    Medium,
    /// Optional.
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{label}")
    }
}

/// One suggested learning area with its expected friction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LearningRecommendation {
    /// Human-readable area name.
    pub area: String,
    /// Priority tier.
    pub priority: Priority,
    /// Friction score of the recommended area.
    pub friction: f64,
    /// Why this area is recommended.
    pub rationale: String,
    /// Concrete technologies to start with.
    pub suggested_tech: Vec<String>,
    /// Friction estimate repeated for the scoping collaborator.
    pub estimated_friction: f64,
}

/// Bookkeeping attached to a predictive profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ModelMetadata {
    /// Scoring model version.
    pub model_version: String,
    /// Repository count the profile was derived from.
    pub based_on_repos: usize,
    /// Provenance marker for the scoring inputs.
    pub data_source: String,
    /// Timestamp carried over from the translated profile.
    pub analysis_timestamp: String,
}

/// The terminal artifact of the pipeline: scores, gaps, and recommendations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PredictiveProfile {
    /// Six-dimension skill scores.
    pub skill_vector: SkillVector,
    /// Style traits inferred from language and library choices.
    pub code_style_profile: CodeStyleProfile,
    /// Per-technology adoption friction.
    pub friction_profile: FrictionProfile,
    /// Per-project-type success likelihood.
    pub capability_assessment: CapabilityAssessment,
    /// Skill dimensions below the gap cutoff, mapped to 1 − score,
    /// descending.
    pub skill_gaps: IndexMap<String, f64>,
    /// Suggested learning areas.
    pub learning_recommendations: Vec<LearningRecommendation>,
    /// Composite tool-building aptitude, used by the capability assessment.
    pub devtools_skill: f64,
    /// Run bookkeeping.
    pub metadata: ModelMetadata,
}

/// Risk bucket for a project-success prediction.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Success likelihood above 0.7.
    Low,
    /// Success likelihood above 0.4.
    Medium,
    /// Everything below.
    #[default]
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{label}")
    }
}

/// Success prediction for one project type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProjectPrediction {
    /// The project type the prediction is for.
    pub project_type: ProjectType,
    /// Capability score for that type.
    pub success_likelihood: f64,
    /// The friction dimension most relevant to that type.
    pub friction_score: f64,
    /// Coarse risk bucket.
    pub risk_level: RiskLevel,
    /// Human-readable warnings triggered by threshold rules.
    pub tension_points: Vec<String>,
    /// Skill dimensions below the per-type requirement.
    pub skill_gaps: Vec<String>,
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_resolve_to_defaults() {
        let profile: TranslatedProfile =
            serde_json::from_str("{\"languages\": {\"Python\": 100.0}}").expect("parse");

        assert_eq!(profile.languages.get("Python").copied(), Some(100.0));
        assert_eq!(profile.habits.frequency, 0.0);
        assert_eq!(profile.habits.commit_pattern, CommitPattern::Sporadic);
        assert_eq!(profile.technical_depth.level, DepthLevel::Beginner);
        assert_eq!(profile.quality.rating, QualityRating::NeedsImprovement);
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn enums_serialize_snake_case() {
        let json = serde_json::to_string(&QualityRating::NeedsImprovement).expect("json");
        assert_eq!(json, "\"needs_improvement\"");
        let json = serde_json::to_string(&CommitPattern::Daily).expect("json");
        assert_eq!(json, "\"daily\"");
        let json = serde_json::to_string(&ProjectType::ApiService).expect("json");
        assert_eq!(json, "\"api_service\"");
    }

    #[test]
    fn project_type_parses_known_tags() {
        assert_eq!(ProjectType::parse("ml_model"), Some(ProjectType::MlModel));
        assert_eq!(
            ProjectType::parse("  Frontend_App "),
            Some(ProjectType::FrontendApp)
        );
        assert_eq!(ProjectType::parse("blockchain"), None);
    }

    #[test]
    fn capability_score_lookup_matches_entries() {
        let capabilities = CapabilityAssessment {
            api_service: 0.9,
            ml_model: 0.1,
            ..CapabilityAssessment::default()
        };
        assert_eq!(capabilities.score(ProjectType::ApiService), 0.9);
        assert_eq!(capabilities.score(ProjectType::MlModel), 0.1);
    }

    #[test]
    fn rounding_helpers_round_half_up() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round3(0.123_456), 0.123);
        assert_eq!(round2(0.005), 0.01);
    }
}
