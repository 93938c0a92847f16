//! Contract deployment: artifacts in, registry records out

pub mod artifacts;
#[allow(clippy::module_inception)]
mod deploy;
pub mod registry;

pub use deploy::{deploy, should_auto_mine, DeployOptions};
