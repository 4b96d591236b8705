//! Keypoint job worker.
//!
//! This crate provides:
//! - Environment-driven worker configuration
//! - Keypoint job loading through a pluggable source
//! - Stage-tracked analysis with per-job status records
//! - Report output under `{output_dir}/processed/{videoId}/summary.json`

pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod processor;
pub mod source;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use job::{JobRecord, JobStage, JobStatus, KeypointJob};
pub use logging::JobLogger;
pub use processor::JobProcessor;
pub use source::{JsonFileSource, KeypointSource};
