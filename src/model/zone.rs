use crate::error::ZoneError;
use crate::model::dns::FQDNName;
use crate::model::host::{HostAddresses, HostDefaults, HostName, HostRecord};
use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

/// SOA timers and the `$TTL`, as BIND duration strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SoaTimers {
    pub ttl: String,
    pub refresh: String,
    pub retry: String,
    pub expiry: String,
    pub minimum: String,
}

impl Default for SoaTimers {
    fn default() -> Self {
        SoaTimers {
            ttl: "1W".to_string(),
            refresh: "3H".to_string(),
            retry: "30M".to_string(),
            expiry: "2W".to_string(),
            minimum: "1W".to_string(),
        }
    }
}

/// `YYYYMMDDHH`, e.g. 2026101812.
pub fn serial_from<T: Datelike + Timelike>(time: &T) -> u32 {
    let year = time.year().clamp(0, 4293) as u32;

    year * 1_000_000 + time.month() * 10_000 + time.day() * 100 + time.hour()
}

pub fn serial_now() -> u32 {
    serial_from(&chrono::Local::now())
}

/// Everything needed to render both zones of one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfig {
    fqdn: FQDNName,
    base_domain: FQDNName,
    serial: u32,
    mailbox: String,
    timers: SoaTimers,
    records: Vec<HostRecord>,
}

impl ZoneConfig {
    pub fn new(
        fqdn: FQDNName,
        serial: u32,
        mailbox: &str,
        timers: SoaTimers,
        addresses: &HostAddresses,
        defaults: &HostDefaults,
    ) -> Result<Self, ZoneError> {
        if fqdn.is_wildcard() {
            return Err(ZoneError::InvalidArgument(format!("'{}' is a wildcard name, not a cluster domain", fqdn)));
        }

        let base_domain = fqdn.parent()?;

        Ok(ZoneConfig {
            fqdn,
            base_domain,
            serial,
            mailbox: mailbox.to_string(),
            timers,
            records: addresses.to_records(defaults),
        })
    }

    pub fn fqdn(&self) -> &FQDNName {
        &self.fqdn
    }

    pub fn base_domain(&self) -> &FQDNName {
        &self.base_domain
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn mailbox(&self) -> &str {
        &self.mailbox
    }

    pub fn timers(&self) -> &SoaTimers {
        &self.timers
    }

    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }

    #[cfg(test)]
    pub(crate) fn record(&self, name: HostName) -> Option<&HostRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// `ns1.<base domain>`
    pub fn name_server(&self) -> Result<FQDNName, ZoneError> {
        Ok(self.base_domain.child(HostName::Ns1.as_ref())?)
    }

    /// Owner name of a host record, ns1 under the base domain and the rest under the cluster.
    pub fn owner_of(&self, name: HostName) -> Result<FQDNName, ZoneError> {
        let parent = if name.is_name_server() {
            &self.base_domain
        } else {
            &self.fqdn
        };

        Ok(parent.child(name.as_ref())?)
    }
}
