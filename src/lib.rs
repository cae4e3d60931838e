pub mod analyzer;
pub mod api;
pub mod config;
pub mod domain_utils;
pub mod extraction;
pub mod ingest;
pub mod result;
pub mod rules;

pub use analyzer::EmailAnalyzer;
pub use config::Config;
pub use ingest::UploadedFile;
pub use result::AnalysisResult;
pub use rules::{RuleEngine, SuspicionRule, Verdict};
