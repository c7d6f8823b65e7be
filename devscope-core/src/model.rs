//! Predictive scoring model.
//!
//! Consumes a translated profile and produces skill, style, friction, and
//! capability vectors plus gap analysis, learning recommendations, and
//! per-project success predictions. The whole module is a chain of small
//! pure functions; the weights below are pinned empirical constants, not
//! values derived at runtime.

use indexmap::IndexMap;

use crate::domain::{
    CapabilityAssessment, CodeStyleProfile, FrictionProfile, LearningRecommendation,
    ModelMetadata, PredictiveProfile, Priority, ProjectPrediction, ProjectType, RiskLevel,
    SkillVector, TranslatedProfile, round3,
};

/// Scoring model version recorded in the predictive metadata.
pub const MODEL_VERSION: &str = "2.0.0";
/// Provenance marker: the model sees static signals only, no behavioral data.
const DATA_SOURCE: &str = "static_analysis_only";

/// Skill dimensions below this score are reported as gaps.
pub const SKILL_GAP_CUTOFF: f64 = 0.5;

// Skill-vector blends. Each array lists the weights in the order named by
// the comment.
/// backend: composition.backend, Python language share, quality score.
const BACKEND_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// frontend: composition.frontend, frontend-language share.
const FRONTEND_WEIGHTS: [f64; 2] = [0.7, 0.3];
/// data: composition.data, data_engineering skill.
const DATA_WEIGHTS: [f64; 2] = [0.5, 0.5];
/// architecture: depth score, quality score, saturated mean repo size.
const ARCHITECTURE_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// Bonus added to the AI/ML dimension when an AI client library is present.
const AI_LIBRARY_BONUS: f64 = 0.2;
/// Mean repository size, in kilobytes, that saturates the architecture size
/// signal.
const ARCHITECTURE_SIZE_DIVISOR_KB: f64 = 2_000.0;

// Code-style signals.
/// TypeScript share, in percent, that saturates the type-safety signal.
const TYPE_SAFETY_TS_DIVISOR: f64 = 50.0;
/// Bonus for carrying a typing library.
const TYPING_LIBRARY_BONUS: f64 = 0.3;
/// More functional-indicator libraries than this flips the style toggle.
const FUNCTIONAL_LIBRARY_THRESHOLD: usize = 2;
/// Style value when the toggle leans functional.
const FUNCTIONAL_STYLE_SCORE: f64 = 0.3;
/// Style value when the toggle leans object-oriented.
const OOP_STYLE_SCORE: f64 = 0.7;
/// Language count that saturates the diversity signal.
const LANGUAGE_DIVERSITY_DIVISOR: f64 = 6.0;
/// Minimum language share, in percent, to count toward diversity.
const DIVERSE_LANGUAGE_MIN_PERCENT: f64 = 1.0;

// Friction blends: friction = 1 − Σ weightᵢ·signalᵢ, floored at 0.
/// react: frontend, type safety, complexity tolerance.
const REACT_FRICTION_WEIGHTS: [f64; 3] = [0.4, 0.3, 0.3];
/// vue: frontend, language diversity.
const VUE_FRICTION_WEIGHTS: [f64; 2] = [0.6, 0.4];
/// typescript: type safety, frontend, complexity tolerance.
const TYPESCRIPT_FRICTION_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// python typing: type safety, backend.
const PYTHON_TYPING_FRICTION_WEIGHTS: [f64; 2] = [0.6, 0.4];
/// ml project: ai_ml, data, backend, quality score.
const ML_PROJECT_FRICTION_WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];
/// devops: cloud, backend.
const DEVOPS_FRICTION_WEIGHTS: [f64; 2] = [0.6, 0.4];
/// microservices: architecture, backend, cloud.
const MICROSERVICES_FRICTION_WEIGHTS: [f64; 3] = [0.4, 0.3, 0.3];
/// fullstack: frontend, backend, architecture.
const FULLSTACK_FRICTION_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];
/// mobile: frontend, language diversity, architecture.
const MOBILE_FRICTION_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

// Devtools composite.
/// devtools: CLI libraries, advanced-pattern libraries, testing libraries,
/// quality score.
const DEVTOOLS_WEIGHTS: [f64; 4] = [0.35, 0.25, 0.25, 0.15];
/// CLI library count that saturates its signal.
const CLI_LIBRARY_SATURATION: f64 = 2.0;
/// Advanced-pattern library count that saturates its signal.
const ADVANCED_LIBRARY_SATURATION: f64 = 4.0;
/// Testing library count that saturates its signal.
const TESTING_LIBRARY_SATURATION: f64 = 2.0;

// Capability blends, clamped to [0, 1].
/// api service: backend, architecture, quality score.
const API_SERVICE_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// cli tool: backend, devtools, quality score.
const CLI_TOOL_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];
/// data pipeline: data, backend, architecture.
const DATA_PIPELINE_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];
/// ml model: ai_ml, data, quality score.
const ML_MODEL_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// frontend app: frontend, quality score.
const FRONTEND_APP_WEIGHTS: [f64; 2] = [0.7, 0.3];
/// fullstack app: frontend, backend, architecture.
const FULLSTACK_APP_WEIGHTS: [f64; 3] = [0.3, 0.4, 0.3];
/// infrastructure: cloud, backend, architecture.
const INFRASTRUCTURE_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];
/// plugin system: backend, architecture, devtools.
const PLUGIN_SYSTEM_WEIGHTS: [f64; 3] = [0.4, 0.3, 0.3];

// Learning-path rule thresholds.
/// Backend score that counts as a strong foundation.
const STRONG_BACKEND_CUTOFF: f64 = 0.6;
/// Frontend score below which frontend work is recommended.
const WEAK_FRONTEND_CUTOFF: f64 = 0.3;
/// Data score that counts as a foundation for ML work.
const STRONG_DATA_CUTOFF: f64 = 0.4;
/// AI/ML score below which ML work is recommended.
const WEAK_AI_ML_CUTOFF: f64 = 0.3;
/// Cloud score below which infrastructure work is recommended.
const WEAK_CLOUD_CUTOFF: f64 = 0.2;
/// React is suggested below this friction, Vue above it.
const REACT_SUGGESTION_FRICTION_CUTOFF: f64 = 0.6;

// Prediction thresholds.
/// Success likelihood above which the risk bucket is low.
const LOW_RISK_CUTOFF: f64 = 0.7;
/// Success likelihood above which the risk bucket is medium.
const MEDIUM_RISK_CUTOFF: f64 = 0.4;
/// Success likelihood below which a capability tension is reported.
const LOW_SUCCESS_TENSION_CUTOFF: f64 = 0.4;
/// Friction above which a learning-curve tension is reported.
const HIGH_FRICTION_TENSION_CUTOFF: f64 = 0.6;
/// Quality score below which a coverage tension is reported.
const LOW_QUALITY_TENSION_CUTOFF: f64 = 0.5;
/// Friction reported for project types without a dedicated dimension.
const DEFAULT_RELEVANT_FRICTION: f64 = 0.5;

/// AI client libraries that grant the AI/ML bonus.
const AI_CLIENT_LIBRARIES: &[&str] = &["openai", "anthropic", "langchain"];
/// Typing libraries that grant the type-safety bonus.
const TYPING_LIBRARIES: &[&str] = &["typing", "mypy", "pydantic"];
/// Libraries that indicate a functional style.
const FUNCTIONAL_LIBRARIES: &[&str] = &["functools", "itertools", "map", "filter", "reduce"];
/// Libraries that indicate CLI tooling experience.
const CLI_LIBRARIES: &[&str] = &["argparse", "click", "typer", "rich", "colorama"];
/// Libraries that indicate advanced language-pattern usage.
const ADVANCED_PATTERN_LIBRARIES: &[&str] = &[
    "functools",
    "itertools",
    "collections",
    "heapq",
    "lru_cache",
    "cache",
    "deque",
];
/// Libraries that indicate testing discipline.
const TESTING_LIBRARIES: &[&str] = &["pytest", "unittest", "mock"];

/// Generate the complete predictive profile for a translated profile.
pub fn generate_predictive_profile(profile: &TranslatedProfile) -> PredictiveProfile {
    let skill_vector = compute_skill_vector(profile);
    let code_style_profile = compute_code_style(profile);
    let friction_profile =
        compute_friction(&skill_vector, &code_style_profile, profile.quality.quality_score);
    let devtools_skill = infer_devtools_skill(profile);
    let capability_assessment =
        compute_capabilities(&skill_vector, devtools_skill, profile.quality.quality_score);
    let skill_gaps = identify_skill_gaps(&skill_vector);
    let learning_recommendations = recommend_learning_path(&skill_vector, &friction_profile);

    PredictiveProfile {
        skill_vector,
        code_style_profile,
        friction_profile,
        capability_assessment,
        skill_gaps,
        learning_recommendations,
        devtools_skill,
        metadata: ModelMetadata {
            model_version: MODEL_VERSION.to_string(),
            based_on_repos: profile.metadata.total_repositories,
            data_source: DATA_SOURCE.to_string(),
            analysis_timestamp: profile.metadata.analysis_timestamp.clone(),
        },
    }
}

/// Synthesize the six-dimension skill vector from static signals.
pub fn compute_skill_vector(profile: &TranslatedProfile) -> SkillVector {
    let composition = &profile.composition;
    let quality = profile.quality.quality_score;
    let depth = &profile.technical_depth;

    let python_share = language_share(profile, "Python") / 100.0;
    let backend = BACKEND_WEIGHTS[0] * composition.backend
        + BACKEND_WEIGHTS[1] * python_share
        + BACKEND_WEIGHTS[2] * quality;

    let frontend_share = (language_share(profile, "JavaScript")
        + language_share(profile, "TypeScript")
        + language_share(profile, "HTML")
        + language_share(profile, "CSS"))
        / 100.0;
    let frontend =
        FRONTEND_WEIGHTS[0] * composition.frontend + FRONTEND_WEIGHTS[1] * frontend_share;

    let data = DATA_WEIGHTS[0] * composition.data
        + DATA_WEIGHTS[1] * skill_score(profile, "data_engineering");

    let ai_bonus = if has_any_library(profile, AI_CLIENT_LIBRARIES) {
        AI_LIBRARY_BONUS
    } else {
        0.0
    };
    let ai_ml = skill_score(profile, "ai_ml") + ai_bonus;

    let cloud_infrastructure = skill_score(profile, "cloud_devops");

    let size_signal = (depth.avg_repo_size / ARCHITECTURE_SIZE_DIVISOR_KB).min(1.0);
    let architecture = ARCHITECTURE_WEIGHTS[0] * depth.depth_score
        + ARCHITECTURE_WEIGHTS[1] * quality
        + ARCHITECTURE_WEIGHTS[2] * size_signal;

    SkillVector {
        backend: round3(clamp01(backend)),
        frontend: round3(clamp01(frontend)),
        data: round3(clamp01(data)),
        ai_ml: round3(clamp01(ai_ml)),
        cloud_infrastructure: round3(clamp01(cloud_infrastructure)),
        architecture: round3(clamp01(architecture)),
    }
}

/// Infer style preferences from language and library choices.
pub fn compute_code_style(profile: &TranslatedProfile) -> CodeStyleProfile {
    let typing_bonus = if has_any_library(profile, TYPING_LIBRARIES) {
        TYPING_LIBRARY_BONUS
    } else {
        0.0
    };
    let type_safety =
        language_share(profile, "TypeScript") / TYPE_SAFETY_TS_DIVISOR + typing_bonus;

    let functional_count = count_library_hits(profile, FUNCTIONAL_LIBRARIES);
    let functional_vs_oop = if functional_count > FUNCTIONAL_LIBRARY_THRESHOLD {
        FUNCTIONAL_STYLE_SCORE
    } else {
        OOP_STYLE_SCORE
    };

    let diverse_languages = profile
        .languages
        .values()
        .filter(|share| **share > DIVERSE_LANGUAGE_MIN_PERCENT)
        .count() as f64;
    let language_diversity = (diverse_languages / LANGUAGE_DIVERSITY_DIVISOR).min(1.0);

    CodeStyleProfile {
        type_safety_preference: round3(type_safety.min(1.0)),
        functional_vs_oop: round3(functional_vs_oop),
        language_diversity: round3(language_diversity),
        complexity_tolerance: round3(profile.technical_depth.depth_score),
    }
}

/// Friction per technology: 1 minus the weighted blend of the relevant
/// proficiency signals, floored at 0.
pub fn compute_friction(
    skills: &SkillVector,
    style: &CodeStyleProfile,
    quality_score: f64,
) -> FrictionProfile {
    let react = 1.0
        - (REACT_FRICTION_WEIGHTS[0] * skills.frontend
            + REACT_FRICTION_WEIGHTS[1] * style.type_safety_preference
            + REACT_FRICTION_WEIGHTS[2] * style.complexity_tolerance);
    let vue = 1.0
        - (VUE_FRICTION_WEIGHTS[0] * skills.frontend
            + VUE_FRICTION_WEIGHTS[1] * style.language_diversity);
    let typescript = 1.0
        - (TYPESCRIPT_FRICTION_WEIGHTS[0] * style.type_safety_preference
            + TYPESCRIPT_FRICTION_WEIGHTS[1] * skills.frontend
            + TYPESCRIPT_FRICTION_WEIGHTS[2] * style.complexity_tolerance);
    let python_typing = 1.0
        - (PYTHON_TYPING_FRICTION_WEIGHTS[0] * style.type_safety_preference
            + PYTHON_TYPING_FRICTION_WEIGHTS[1] * skills.backend);
    let ml_project = 1.0
        - (ML_PROJECT_FRICTION_WEIGHTS[0] * skills.ai_ml
            + ML_PROJECT_FRICTION_WEIGHTS[1] * skills.data
            + ML_PROJECT_FRICTION_WEIGHTS[2] * skills.backend
            + ML_PROJECT_FRICTION_WEIGHTS[3] * quality_score);
    let devops = 1.0
        - (DEVOPS_FRICTION_WEIGHTS[0] * skills.cloud_infrastructure
            + DEVOPS_FRICTION_WEIGHTS[1] * skills.backend);
    let microservices = 1.0
        - (MICROSERVICES_FRICTION_WEIGHTS[0] * skills.architecture
            + MICROSERVICES_FRICTION_WEIGHTS[1] * skills.backend
            + MICROSERVICES_FRICTION_WEIGHTS[2] * skills.cloud_infrastructure);
    let fullstack = 1.0
        - (FULLSTACK_FRICTION_WEIGHTS[0] * skills.frontend
            + FULLSTACK_FRICTION_WEIGHTS[1] * skills.backend
            + FULLSTACK_FRICTION_WEIGHTS[2] * skills.architecture);
    let mobile = 1.0
        - (MOBILE_FRICTION_WEIGHTS[0] * skills.frontend
            + MOBILE_FRICTION_WEIGHTS[1] * style.language_diversity
            + MOBILE_FRICTION_WEIGHTS[2] * skills.architecture);

    FrictionProfile {
        react_friction: round3(react.max(0.0)),
        vue_friction: round3(vue.max(0.0)),
        typescript_friction: round3(typescript.max(0.0)),
        python_typing_friction: round3(python_typing.max(0.0)),
        ml_project_friction: round3(ml_project.max(0.0)),
        devops_friction: round3(devops.max(0.0)),
        microservices_friction: round3(microservices.max(0.0)),
        fullstack_friction: round3(fullstack.max(0.0)),
        mobile_friction: round3(mobile.max(0.0)),
    }
}

/// Composite tool-building aptitude from library usage and quality
/// discipline. Feeds the capability assessment; not part of the skill
/// vector.
pub fn infer_devtools_skill(profile: &TranslatedProfile) -> f64 {
    let cli_signal =
        (count_library_hits(profile, CLI_LIBRARIES) as f64 / CLI_LIBRARY_SATURATION).min(1.0);
    let advanced_signal = (count_library_hits(profile, ADVANCED_PATTERN_LIBRARIES) as f64
        / ADVANCED_LIBRARY_SATURATION)
        .min(1.0);
    let testing_signal = (count_library_hits(profile, TESTING_LIBRARIES) as f64
        / TESTING_LIBRARY_SATURATION)
        .min(1.0);

    round3(
        DEVTOOLS_WEIGHTS[0] * cli_signal
            + DEVTOOLS_WEIGHTS[1] * advanced_signal
            + DEVTOOLS_WEIGHTS[2] * testing_signal
            + DEVTOOLS_WEIGHTS[3] * profile.quality.quality_score,
    )
}

/// Success likelihood per project type, clamped to [0, 1].
pub fn compute_capabilities(
    skills: &SkillVector,
    devtools_skill: f64,
    quality_score: f64,
) -> CapabilityAssessment {
    let api_service = API_SERVICE_WEIGHTS[0] * skills.backend
        + API_SERVICE_WEIGHTS[1] * skills.architecture
        + API_SERVICE_WEIGHTS[2] * quality_score;
    let cli_tool = CLI_TOOL_WEIGHTS[0] * skills.backend
        + CLI_TOOL_WEIGHTS[1] * devtools_skill
        + CLI_TOOL_WEIGHTS[2] * quality_score;
    let data_pipeline = DATA_PIPELINE_WEIGHTS[0] * skills.data
        + DATA_PIPELINE_WEIGHTS[1] * skills.backend
        + DATA_PIPELINE_WEIGHTS[2] * skills.architecture;
    let ml_model = ML_MODEL_WEIGHTS[0] * skills.ai_ml
        + ML_MODEL_WEIGHTS[1] * skills.data
        + ML_MODEL_WEIGHTS[2] * quality_score;
    let frontend_app =
        FRONTEND_APP_WEIGHTS[0] * skills.frontend + FRONTEND_APP_WEIGHTS[1] * quality_score;
    let fullstack_app = FULLSTACK_APP_WEIGHTS[0] * skills.frontend
        + FULLSTACK_APP_WEIGHTS[1] * skills.backend
        + FULLSTACK_APP_WEIGHTS[2] * skills.architecture;
    let infrastructure = INFRASTRUCTURE_WEIGHTS[0] * skills.cloud_infrastructure
        + INFRASTRUCTURE_WEIGHTS[1] * skills.backend
        + INFRASTRUCTURE_WEIGHTS[2] * skills.architecture;
    let plugin_system = PLUGIN_SYSTEM_WEIGHTS[0] * skills.backend
        + PLUGIN_SYSTEM_WEIGHTS[1] * skills.architecture
        + PLUGIN_SYSTEM_WEIGHTS[2] * devtools_skill;

    CapabilityAssessment {
        api_service: round3(clamp01(api_service)),
        cli_tool: round3(clamp01(cli_tool)),
        data_pipeline: round3(clamp01(data_pipeline)),
        ml_model: round3(clamp01(ml_model)),
        frontend_app: round3(clamp01(frontend_app)),
        fullstack_app: round3(clamp01(fullstack_app)),
        infrastructure: round3(clamp01(infrastructure)),
        plugin_system: round3(clamp01(plugin_system)),
    }
}

/// Skill dimensions below the gap cutoff, mapped to 1 − score, descending.
pub fn identify_skill_gaps(skills: &SkillVector) -> IndexMap<String, f64> {
    let mut gaps: Vec<(String, f64)> = skills
        .entries()
        .into_iter()
        .filter(|(_, score)| *score < SKILL_GAP_CUTOFF)
        .map(|(name, score)| (name.to_string(), round3(1.0 - score)))
        .collect();
    gaps.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    gaps.into_iter().collect()
}

/// Rule-based learning recommendations from skill and friction levels.
pub fn recommend_learning_path(
    skills: &SkillVector,
    friction: &FrictionProfile,
) -> Vec<LearningRecommendation> {
    let mut recommendations = Vec::new();

    // Strong backend, weak frontend: fullstack opportunity.
    if skills.backend > STRONG_BACKEND_CUTOFF && skills.frontend < WEAK_FRONTEND_CUTOFF {
        let first_framework = if friction.react_friction < REACT_SUGGESTION_FRICTION_CUTOFF {
            "React"
        } else {
            "Vue"
        };
        recommendations.push(LearningRecommendation {
            area: "Frontend Development".to_string(),
            priority: Priority::High,
            friction: friction.react_friction,
            rationale: "Strong backend provides foundation for fullstack capability".to_string(),
            suggested_tech: vec![
                first_framework.to_string(),
                "TypeScript".to_string(),
                "Tailwind CSS".to_string(),
            ],
            estimated_friction: friction.react_friction,
        });
    }

    // Data foundation without ML experience: ML opportunity.
    if skills.data > STRONG_DATA_CUTOFF && skills.ai_ml < WEAK_AI_ML_CUTOFF {
        recommendations.push(LearningRecommendation {
            area: "AI/ML Engineering".to_string(),
            priority: Priority::Medium,
            friction: friction.ml_project_friction,
            rationale: "Data skills provide foundation for ML work".to_string(),
            suggested_tech: vec![
                "OpenAI API".to_string(),
                "LangChain".to_string(),
                "Vector DBs".to_string(),
            ],
            estimated_friction: friction.ml_project_friction,
        });
    }

    // Strong backend without cloud experience: infrastructure opportunity.
    if skills.backend > STRONG_BACKEND_CUTOFF
        && skills.cloud_infrastructure < WEAK_CLOUD_CUTOFF
    {
        recommendations.push(LearningRecommendation {
            area: "Cloud Infrastructure".to_string(),
            priority: Priority::Medium,
            friction: friction.devops_friction,
            rationale: "Backend expertise needs cloud deployment skills".to_string(),
            suggested_tech: vec![
                "Docker".to_string(),
                "AWS/Vercel".to_string(),
                "CI/CD".to_string(),
            ],
            estimated_friction: friction.devops_friction,
        });
    }

    recommendations
}

/// Predict success for one project type against a translated profile.
pub fn predict_project_success(
    project_type: ProjectType,
    profile: &TranslatedProfile,
) -> ProjectPrediction {
    let skills = compute_skill_vector(profile);
    let style = compute_code_style(profile);
    let friction = compute_friction(&skills, &style, profile.quality.quality_score);
    let devtools_skill = infer_devtools_skill(profile);
    let capabilities =
        compute_capabilities(&skills, devtools_skill, profile.quality.quality_score);

    let success = capabilities.score(project_type);
    let friction_score = relevant_friction(project_type, &friction);

    let mut tension_points = Vec::new();
    if success < LOW_SUCCESS_TENSION_CUTOFF {
        tension_points.push(format!(
            "Low capability match ({success:.2}) - significant skill gap"
        ));
    }
    if friction_score > HIGH_FRICTION_TENSION_CUTOFF {
        tension_points.push(format!(
            "High friction ({friction_score:.2}) - steep learning curve"
        ));
    }
    if profile.quality.quality_score < LOW_QUALITY_TENSION_CUTOFF {
        tension_points.push("Low test coverage may impact production quality".to_string());
    }

    ProjectPrediction {
        project_type,
        success_likelihood: round3(success),
        friction_score: round3(friction_score),
        risk_level: classify_risk(success),
        tension_points,
        skill_gaps: project_skill_gaps(project_type, &skills),
    }
}

fn classify_risk(success: f64) -> RiskLevel {
    if success > LOW_RISK_CUTOFF {
        RiskLevel::Low
    } else if success > MEDIUM_RISK_CUTOFF {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// The friction dimension most relevant to a project type; types without a
/// dedicated dimension report the neutral default.
fn relevant_friction(project_type: ProjectType, friction: &FrictionProfile) -> f64 {
    match project_type {
        ProjectType::FrontendApp => friction.react_friction,
        ProjectType::FullstackApp => friction.fullstack_friction,
        ProjectType::MlModel => friction.ml_project_friction,
        ProjectType::Infrastructure => friction.devops_friction,
        ProjectType::CliTool => friction.python_typing_friction,
        _ => DEFAULT_RELEVANT_FRICTION,
    }
}

/// Per-type minimum skill requirements checked for gap reporting.
fn project_gap_requirements(project_type: ProjectType) -> &'static [(&'static str, f64)] {
    match project_type {
        ProjectType::FrontendApp => &[("frontend", 0.5), ("architecture", 0.4)],
        ProjectType::FullstackApp => {
            &[("frontend", 0.5), ("backend", 0.6), ("architecture", 0.5)]
        }
        ProjectType::MlModel => &[("ai_ml", 0.4), ("data", 0.4)],
        ProjectType::Infrastructure => &[("cloud_infrastructure", 0.4), ("backend", 0.5)],
        _ => &[],
    }
}

fn project_skill_gaps(project_type: ProjectType, skills: &SkillVector) -> Vec<String> {
    let entries = skills.entries();
    project_gap_requirements(project_type)
        .iter()
        .filter_map(|(name, threshold)| {
            let score = entries
                .iter()
                .find(|(entry_name, _)| entry_name == name)
                .map(|(_, score)| *score)
                .unwrap_or(0.0);
            if score < *threshold {
                Some(format!("{name}: {score:.2} (needs >={threshold})"))
            } else {
                None
            }
        })
        .collect()
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn language_share(profile: &TranslatedProfile, language: &str) -> f64 {
    profile.languages.get(language).copied().unwrap_or(0.0)
}

fn skill_score(profile: &TranslatedProfile, skill: &str) -> f64 {
    profile.skills.get(skill).copied().unwrap_or(0.0)
}

fn has_any_library(profile: &TranslatedProfile, names: &[&str]) -> bool {
    count_library_hits(profile, names) > 0
}

fn count_library_hits(profile: &TranslatedProfile, names: &[&str]) -> usize {
    profile
        .libraries
        .keys()
        .filter(|library| {
            let folded = library.to_lowercase();
            names.contains(&folded.as_str())
        })
        .count()
}
