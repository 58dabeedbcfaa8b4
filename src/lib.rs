//! Lifecycle orchestration for Fusion services: installs, uninstalls, starts
//! and stops each configured service through its wrapper executable, polling
//! the status runner until the service settles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
