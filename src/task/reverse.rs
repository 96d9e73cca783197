use crate::formatter::dns_zone::render_reverse;
use crate::io::OutputTarget;
use crate::model::zone::ZoneConfig;
use crate::task::Task;
use std::path::PathBuf;

pub struct GenerateReverseZoneTask<'a> {
    config: &'a ZoneConfig,
    path: PathBuf,
}

impl<'a> GenerateReverseZoneTask<'a> {
    pub fn new(config: &'a ZoneConfig, path: PathBuf) -> Self {
        Self { config, path }
    }
}

impl Task for GenerateReverseZoneTask<'_> {
    fn name(&self) -> &str {
        "Generate reverse zone"
    }

    fn run(&self) -> anyhow::Result<()> {
        // Rendered before the file is touched, a failure leaves nothing behind
        let content = render_reverse(self.config)?;

        OutputTarget::File(self.path.clone()).write(&content)
    }
}
