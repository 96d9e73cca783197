pub mod error;
pub mod model;
pub mod io;
pub mod parser;
pub mod task;

pub mod formatter;

use model::host::HostDefaults;
use model::zone::SoaTimers;
use serde::{Deserialize, Serialize};

/// Named defaults for one run, loaded from a JSON file or built in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub soa: SoaTimers,
    pub mailbox: String,

    /// Stop asking for an address after this many invalid answers. Unset asks forever.
    pub max_attempts: Option<u32>,

    pub hosts: HostDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            soa: SoaTimers::default(),
            mailbox: "root".to_string(),
            max_attempts: None,
            hosts: HostDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_json() {
        let json = serde_json::to_string_pretty(&AppConfig::default()).unwrap();

        assert!(json.contains("\"master0\": \"192.168.1.97\""));
        assert_eq!(serde_json::from_str::<AppConfig>(&json).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(serde_json::from_str::<AppConfig>("{}").unwrap(), AppConfig::default());
    }
}
