pub mod auto_deploy;
pub mod deploy_repository;
pub mod load_ssh_key;
pub mod synchronize_repository;

pub use auto_deploy::AutoDeployUseCase;
pub use deploy_repository::DeployExecutor;
pub use load_ssh_key::TransportConfigurator;
pub use synchronize_repository::{RepositorySynchronizer, SyncOutcome, POSTCONDITION_FAILED_EXIT_CODE};
