use crate::error::ZoneError;
use crate::model::dns::{DNSRecord, DNSRecordData, DNSZone, FQDNName};
use crate::model::zone::ZoneConfig;
use crate::parser::ip::{ptr_name, reverse_zone_origin};
use std::str::FromStr;
use tracing::warn;

// Reverse zones keep their own retry timer, independent of the configured one.
const REVERSE_ZONE_RETRY: &str = "30M";

/// Whether the forward zone carries the A record of its own name server.
///
/// Zones written to a file include it; zones printed to standard output
/// have always been generated without it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameServerGlue {
    Include,
    Omit,
}

fn new_zone(config: &ZoneConfig, origin: FQDNName, retry: &str) -> Result<DNSZone, ZoneError> {
    let timers = config.timers();
    let name_server = config.name_server()?;

    let mut zone = DNSZone::new(origin.clone(), timers.ttl.clone(), DNSRecordData::SOA {
        mname: name_server.clone(),
        rname: config.mailbox().to_string(),
        serial: config.serial(),
        refresh: timers.refresh.clone(),
        retry: retry.to_string(),
        expire: timers.expiry.clone(),
        minimum: timers.minimum.clone(),
    });

    zone.add_record(DNSRecord::new(origin, DNSRecordData::NS(name_server)));

    Ok(zone)
}

pub fn build_forward_zone(config: &ZoneConfig, glue: NameServerGlue) -> Result<DNSZone, ZoneError> {
    let mut zone = new_zone(config, config.base_domain().clone(), &config.timers().retry)?;

    for record in config.records() {
        if record.name.is_name_server() && glue == NameServerGlue::Omit {
            continue;
        }

        zone.add_record(DNSRecord::new(
            config.owner_of(record.name)?,
            DNSRecordData::A(record.ip.clone()),
        ));
    }

    Ok(zone)
}

pub fn build_reverse_zone(config: &ZoneConfig) -> Result<DNSZone, ZoneError> {
    let name_server_ip = config
        .records()
        .iter()
        .find(|r| r.name.is_name_server())
        .map(|r| r.ip.as_str())
        .unwrap_or_default();

    let origin = reverse_zone_origin(name_server_ip)
        .and_then(|origin| FQDNName::from_str(&origin).ok())
        .ok_or_else(|| ZoneError::UnderivableReverseZone(name_server_ip.to_string()))?;

    let mut zone = new_zone(config, origin, REVERSE_ZONE_RETRY)?.declaring_origin();

    for record in config.records().iter().filter(|r| r.name.has_ptr_record()) {
        let owner = ptr_name(record.ip.as_str())
            .and_then(|name| FQDNName::from_str(&name).ok())
            .ok_or_else(|| ZoneError::InvalidIpInput(record.ip.to_string()))?;

        if !owner.is_child_of(zone.origin()) {
            warn!("PTR record '{}' for {} is outside reverse zone '{}'", owner, record.name, zone.origin());
        }

        zone.add_record(DNSRecord::new(
            owner,
            DNSRecordData::PTR(config.owner_of(record.name)?),
        ));
    }

    Ok(zone)
}
