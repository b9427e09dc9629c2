pub mod candidate_extractor;
pub mod document_parser;
pub mod errors;
pub mod field_extractor;
pub mod job_templates;
pub mod models;
pub mod pdf;
pub mod service;
pub mod settings_store;
pub mod skill_detector;
pub mod skill_dictionary;
pub mod skill_match;
