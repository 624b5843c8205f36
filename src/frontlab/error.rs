//! Error types for the outer surfaces (files, configuration, output formats)
//!
//! The analysis engine itself never fails: every problem in the analyzed text is a
//! [Diagnostic](super::diagnostics::Diagnostic). These errors only cover what
//! happens around it.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FrontlabError {
    Io(String),
    Config(String),
    InvalidFormat(String),
    UnknownGrammar(String),
    Serialization(String),
}

impl std::error::Error for FrontlabError {}

impl fmt::Display for FrontlabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontlabError::Io(msg) => write!(f, "IO error: {}", msg),
            FrontlabError::Config(msg) => write!(f, "Configuration error: {}", msg),
            FrontlabError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            FrontlabError::UnknownGrammar(name) => write!(
                f,
                "Unknown grammar: {} (expected statement, expression or record)",
                name
            ),
            FrontlabError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<std::io::Error> for FrontlabError {
    fn from(err: std::io::Error) -> Self {
        FrontlabError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for FrontlabError {
    fn from(err: config::ConfigError) -> Self {
        FrontlabError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FrontlabError {
    fn from(err: serde_json::Error) -> Self {
        FrontlabError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FrontlabError {
    fn from(err: serde_yaml::Error) -> Self {
        FrontlabError::Serialization(err.to_string())
    }
}
