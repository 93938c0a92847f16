//! Registered deploy tasks and their selection by tag

use tracing::{info, warn};

use crate::{constants::ERC20_TEST_TAG, env::RuntimeEnvironment, errors::ScriptError};

/// The ERC20Test deploy task
mod erc20_test;

pub use erc20_test::{deploy_erc20_test, VerificationReport};

/// Every deploy task known to the scripts, in execution order
pub const ALL_TASKS: [DeployTask; 1] = [DeployTask::Erc20Test];

/// A deploy task, runnable alone through one of its tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployTask {
    /// Deploy the ERC20Test token and check it answers
    Erc20Test,
}

impl DeployTask {
    /// Stable name of the task, used in logs
    pub fn id(&self) -> &'static str {
        match self {
            DeployTask::Erc20Test => "deploy_erc20_test",
        }
    }

    /// Tags selecting the task in `deploy --tags`
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            DeployTask::Erc20Test => &[ERC20_TEST_TAG],
        }
    }

    /// Run the task
    pub async fn run(self, env: &RuntimeEnvironment) -> Result<(), ScriptError> {
        match self {
            DeployTask::Erc20Test => deploy_erc20_test(env).await,
        }
    }
}

/// Pick the tasks to run: all of them without tags, else those sharing a tag
pub fn select_tasks(tags: &[String]) -> Vec<DeployTask> {
    ALL_TASKS
        .into_iter()
        .filter(|task| {
            tags.is_empty()
                || task
                    .tags()
                    .iter()
                    .any(|tag| tags.iter().any(|wanted| wanted == tag))
        })
        .collect()
}

/// Run the selected tasks one after the other, stopping at the first failure
pub async fn run_tasks(env: &RuntimeEnvironment, tags: &[String]) -> Result<(), ScriptError> {
    let tasks = select_tasks(tags);
    if tasks.is_empty() {
        warn!("No deploy task matches the tags {:?}", tags);
        return Ok(());
    }

    for task in tasks {
        info!("Running {}...", task.id());
        task.run(env).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|tag| tag.to_string()).collect()
    }

    #[test]
    fn no_tags_selects_everything() {
        assert_eq!(select_tasks(&[]), ALL_TASKS.to_vec());
    }

    #[test]
    fn task_tag_selects_the_task() {
        assert_eq!(
            select_tasks(&tags(&["ERC20LYC202330550952"])),
            vec![DeployTask::Erc20Test]
        );
        assert_eq!(
            select_tasks(&tags(&["YourContract", "ERC20LYC202330550952"])),
            vec![DeployTask::Erc20Test]
        );
    }

    #[test]
    fn unrelated_tag_selects_nothing() {
        assert!(select_tasks(&tags(&["YourContract"])).is_empty());
        // Tags are matched exactly
        assert!(select_tasks(&tags(&["erc20lyc202330550952"])).is_empty());
    }
}
