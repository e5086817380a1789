pub mod pipeline_executor;

pub use pipeline_executor::{run_all, run_fail_fast};
