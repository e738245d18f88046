//! gitlab-component-docs - Generate README documentation for GitLab CI/CD components
//!
//! Reads component definitions from `templates/*.yml`, extracts each `spec.inputs`
//! block into an ordered, normalized input list, resolves the project path and
//! version to reference, and renders everything through a Tera template.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod pipeline;
pub mod render;
pub mod resolver;
