#![deny(missing_docs)]
//! DevScope core library.
//!
//! This crate contains the analysis pipeline that turns a raw repository
//! dump into a quantified developer profile: dump parsing, per-repository
//! heuristic analysis, filtered-profile aggregation, developer-profile
//! translation, and predictive modeling. Every stage is a pure function of
//! its input; fetching dumps and serving the resulting artifacts belong to
//! external collaborators.

pub mod analyzer;
pub mod artifacts;
pub mod builder;
pub mod domain;
pub mod error;
pub mod fs;
pub mod model;
pub mod parser;
pub mod report;
pub mod translator;

pub use analyzer::analyze_repository;
pub use artifacts::{
    FILTERED_ARTIFACT, PREDICTIVE_ARTIFACT, TRANSLATED_ARTIFACT, load_filtered_profile,
    load_predictive_profile, load_translated_profile, save_artifact,
};
pub use builder::{build_filtered_profile, build_from_dump};
pub use domain::{
    CapabilityAssessment, CodeStyleProfile, CommitHabits, CommitPattern, CommitStamp,
    Composition, DepthLevel, FilteredProfile, FrictionProfile, LearningRecommendation,
    ModelMetadata, PredictiveProfile, Priority, ProfileMetadata, ProjectPrediction, ProjectType,
    QualityRating, QualityReport, RepositoryAnalysis, RepositoryRecord, RiskLevel, SkillVector,
    TechnicalDepth, TranslatedProfile,
};
pub use error::{DevScopeError, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use model::{generate_predictive_profile, predict_project_success};
pub use parser::parse_dump;
pub use report::{
    render_filtered_text, render_json, render_prediction_text, render_predictive_text,
    render_translated_text,
};
pub use translator::{translate, translate_at};
