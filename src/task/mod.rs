pub mod forward;
pub mod reverse;

use crate::io::OutputTarget;
use crate::model::zone::ZoneConfig;
use forward::GenerateForwardZoneTask;
use reverse::GenerateReverseZoneTask;
use std::path::PathBuf;
use tracing::{error, info};

pub trait Task {
    fn name(&self) -> &str;
    fn run(&self) -> anyhow::Result<()>;
}

/// Output choices of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub forward: OutputTarget,
    pub reverse: Option<PathBuf>,
}

pub fn build_tasks<'a>(options: &GenerateOptions, config: &'a ZoneConfig) -> Vec<Box<dyn Task + 'a>> {
    let mut tasks: Vec<Box<dyn Task + 'a>> = vec![
        Box::new(GenerateForwardZoneTask::new(config, options.forward.clone())),
    ];

    if let Some(path) = &options.reverse {
        tasks.push(Box::new(GenerateReverseZoneTask::new(config, path.clone())));
    }

    tasks
}

/// Runs every task in order and stops at the first failure.
pub fn run_tasks(options: &GenerateOptions, config: &ZoneConfig) -> anyhow::Result<()> {
    for task in build_tasks(options, config) {
        info!("Running task: {}", task.name());

        if let Err(e) = task.run() {
            error!("Error running task '{}': {:?}", task.name(), e);

            return Err(e);
        }

        info!("Successfully completed task: {}", task.name());
    }

    Ok(())
}
