//! Core types and configuration for dockstep.
//!
//! This crate defines the `dockstep.toml` job schema ([`JobConfig`]), the
//! identity of the job a step runs in ([`ProjectIdentity`], [`NodeInfo`]),
//! default-name derivation ([`naming`]), and shared error types.

pub mod config;
pub mod error;
pub mod job;
pub mod naming;

pub use config::{BuildImageConfig, JOB_FILE_NAME, JobConfig, JobSection, PullImageConfig, StepConfig};
pub use error::{Error, Result};
pub use job::{JobKind, NodeInfo, ProjectIdentity, StepKind};
