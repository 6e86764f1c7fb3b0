//! CLI library for testing purposes

pub mod job;
pub mod jobs;

pub use job::run_job;
pub use jobs::{load_job_list, run_jobs};
