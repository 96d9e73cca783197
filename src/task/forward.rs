use crate::formatter::dns_zone::render_forward;
use crate::io::OutputTarget;
use crate::model::zone::ZoneConfig;
use crate::parser::zone::NameServerGlue;
use crate::task::Task;
use tracing::warn;

pub struct GenerateForwardZoneTask<'a> {
    config: &'a ZoneConfig,
    output: OutputTarget,
}

impl<'a> GenerateForwardZoneTask<'a> {
    pub fn new(config: &'a ZoneConfig, output: OutputTarget) -> Self {
        Self { config, output }
    }

    fn glue(&self) -> NameServerGlue {
        if self.output.is_file() {
            NameServerGlue::Include
        } else {
            NameServerGlue::Omit
        }
    }
}

impl Task for GenerateForwardZoneTask<'_> {
    fn name(&self) -> &str {
        "Generate forward zone"
    }

    fn run(&self) -> anyhow::Result<()> {
        let glue = self.glue();

        if glue == NameServerGlue::Omit {
            warn!("Writing forward zone to standard output without an A record for {}", self.config.name_server()?);
        }

        let content = render_forward(self.config, glue)?;

        self.output.write(&content)
    }
}
