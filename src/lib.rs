pub mod core;

pub use crate::core::errors::CoreError;
pub use crate::core::models::{
    CandidateProfile, DocumentKind, EngineSettings, JobMatch, JobPosting, JobRequirement,
    MatchResult, ParsedResume,
};
pub use crate::core::service::CoreService;
pub use crate::core::skill_detector::detect_skills;
pub use crate::core::skill_match::score_skill_match;
