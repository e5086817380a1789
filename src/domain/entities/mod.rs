pub mod autodeploy_config;
pub mod deploy_report;
pub mod repository_config;

pub use autodeploy_config::AutodeployConfig;
pub use deploy_report::DeployReport;
pub use repository_config::RepositoryConfig;
