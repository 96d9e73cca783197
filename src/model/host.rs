use crate::error::ZoneError;
use crate::parser::ip::is_valid_ipv4;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, IntoEnumIterator};

/// An IPv4 address in dotted-quad form that passed `is_valid_ipv4`.
///
/// This is not an `Ipv4Addr`: the validator only checks the shape of the
/// address, so `999.999.999.999` is a legal value here.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedQuad(String);

impl DottedQuad {
    pub fn new(s: &str) -> Result<Self, ZoneError> {
        if is_valid_ipv4(s) {
            Ok(DottedQuad(s.to_string()))
        } else {
            Err(ZoneError::InvalidIpInput(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl DottedQuad {
    pub(crate) fn unchecked(s: &str) -> Self {
        DottedQuad(s.to_string())
    }
}

impl FromStr for DottedQuad {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DottedQuad::new(s)
    }
}

impl TryFrom<String> for DottedQuad {
    type Error = ZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DottedQuad::new(&value)
    }
}

impl From<DottedQuad> for String {
    fn from(value: DottedQuad) -> Self {
        value.0
    }
}

impl Display for DottedQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record labels of the cluster topology, in zone file order.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, EnumIter, AsRefStr, StrumDisplay)]
pub enum HostName {
    #[strum(serialize = "ns1")]
    Ns1,
    #[strum(serialize = "api")]
    Api,
    #[strum(serialize = "api-int")]
    ApiInt,
    #[strum(serialize = "*.apps")]
    AppsWildcard,
    #[strum(serialize = "bootstrap")]
    Bootstrap,
    #[strum(serialize = "master0")]
    Master0,
    #[strum(serialize = "master1")]
    Master1,
    #[strum(serialize = "master2")]
    Master2,
    #[strum(serialize = "worker0")]
    Worker0,
    #[strum(serialize = "worker1")]
    Worker1,
}

impl HostName {
    /// ns1 lives directly under the base domain, everything else under the cluster domain.
    pub fn is_name_server(self) -> bool {
        matches!(self, HostName::Ns1)
    }

    pub fn has_ptr_record(self) -> bool {
        !matches!(self, HostName::Ns1 | HostName::AppsWildcard)
    }
}

/// One interactive prompt. `api` is asked once and bound to both api and api-int.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, EnumIter, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum HostRole {
    Ns1,
    Api,
    Apps,
    Bootstrap,
    Master0,
    Master1,
    Master2,
    Worker0,
    Worker1,
}

impl HostRole {
    pub fn host_names(self) -> &'static [HostName] {
        match self {
            HostRole::Ns1 => &[HostName::Ns1],
            HostRole::Api => &[HostName::Api, HostName::ApiInt],
            HostRole::Apps => &[HostName::AppsWildcard],
            HostRole::Bootstrap => &[HostName::Bootstrap],
            HostRole::Master0 => &[HostName::Master0],
            HostRole::Master1 => &[HostName::Master1],
            HostRole::Master2 => &[HostName::Master2],
            HostRole::Worker0 => &[HostName::Worker0],
            HostRole::Worker1 => &[HostName::Worker1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub name: HostName,
    pub ip: DottedQuad,
}

/// Default address of every host role, as found in the configuration file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct HostDefaults {
    pub ns1: DottedQuad,
    pub api: DottedQuad,
    pub apps: DottedQuad,
    pub bootstrap: DottedQuad,
    pub master0: DottedQuad,
    pub master1: DottedQuad,
    pub master2: DottedQuad,
    pub worker0: DottedQuad,
    pub worker1: DottedQuad,
}

impl HostDefaults {
    pub fn address_for(&self, role: HostRole) -> &DottedQuad {
        match role {
            HostRole::Ns1 => &self.ns1,
            HostRole::Api => &self.api,
            HostRole::Apps => &self.apps,
            HostRole::Bootstrap => &self.bootstrap,
            HostRole::Master0 => &self.master0,
            HostRole::Master1 => &self.master1,
            HostRole::Master2 => &self.master2,
            HostRole::Worker0 => &self.worker0,
            HostRole::Worker1 => &self.worker1,
        }
    }
}

impl Default for HostDefaults {
    fn default() -> Self {
        let ip = |s: &str| DottedQuad(s.to_string());

        HostDefaults {
            ns1: ip("192.168.1.5"),
            api: ip("192.168.1.5"),
            apps: ip("192.168.1.5"),
            bootstrap: ip("192.168.1.96"),
            master0: ip("192.168.1.97"),
            master1: ip("192.168.1.98"),
            master2: ip("192.168.1.99"),
            worker0: ip("192.168.1.11"),
            worker1: ip("192.168.1.12"),
        }
    }
}

/// The address chosen for each host role, in prompt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAddresses(Vec<(HostRole, DottedQuad)>);

impl HostAddresses {
    pub fn new() -> Self {
        HostAddresses(Vec::new())
    }

    pub fn from_defaults(defaults: &HostDefaults) -> Self {
        HostAddresses(
            HostRole::iter()
                .map(|role| (role, defaults.address_for(role).clone()))
                .collect(),
        )
    }

    pub fn set(&mut self, role: HostRole, ip: DottedQuad) {
        match self.0.iter_mut().find(|(r, _)| *r == role) {
            Some(entry) => entry.1 = ip,
            None => self.0.push((role, ip)),
        }
    }

    pub fn get(&self, role: HostRole) -> Option<&DottedQuad> {
        self.0.iter().find(|(r, _)| *r == role).map(|(_, ip)| ip)
    }

    /// Expands roles into records in zone file order. Roles missing from
    /// `self` fall back to `defaults`.
    pub fn to_records(&self, defaults: &HostDefaults) -> Vec<HostRecord> {
        HostRole::iter()
            .flat_map(|role| {
                let ip = self.get(role).unwrap_or_else(|| defaults.address_for(role));

                role.host_names().iter().map(move |&name| HostRecord {
                    name,
                    ip: ip.clone(),
                })
            })
            .collect()
    }
}

impl Default for HostAddresses {
    fn default() -> Self {
        Self::new()
    }
}
