pub mod command_pipeline;
pub mod platform;
pub mod sync_operation;

pub use command_pipeline::CommandPipeline;
pub use platform::{Platform, PlatformError};
pub use sync_operation::{SyncOperation, SyncTrigger, WorkingCopyState};
