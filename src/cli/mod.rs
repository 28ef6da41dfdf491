//! Workflow orchestration and output encoding behind the `next-tag` binary

pub mod orchestration;
pub mod output;

pub use orchestration::{run_tag_workflow, WorkflowResult};
pub use output::{OutputFormat, TagOutputs};
