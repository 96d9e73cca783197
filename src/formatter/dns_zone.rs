use crate::error::ZoneError;
use crate::model::dns::{DNSRecord, DNSRecordData, DNSZone, FQDNName};
use crate::model::zone::ZoneConfig;
use crate::parser::zone::{build_forward_zone, build_reverse_zone, NameServerGlue};

fn owner_str(name: &FQDNName, origin: &FQDNName) -> String {
    if name == origin {
        "@".to_string()
    } else {
        name.to_absolute()
    }
}

fn generate_header(buffer: &mut String, zone: &DNSZone) {
    buffer.push_str(format!("$TTL {}\n", zone.ttl()).as_str());

    if zone.declares_origin() {
        buffer.push_str(format!("$ORIGIN {}\n", zone.origin().to_absolute()).as_str());
    }
}

fn generate_soa_header(buffer: &mut String, soa: &DNSRecordData) {
    /*
    @	IN	SOA	ns1.example.com.	root (
    			2026101812	; serial
    			3H	; refresh
    			30M	; retry
    			2W	; expiry
    			1W )	; minimum
    */
    if let DNSRecordData::SOA {
        mname,
        rname,
        serial,
        refresh,
        retry,
        expire,
        minimum,
    } = soa
    {
        buffer.push_str(format!("@\tIN\tSOA\t{}\t{} (\n", mname.to_absolute(), rname).as_str());
        buffer.push_str(format!("\t\t\t{}\t; serial\n", serial).as_str());
        buffer.push_str(format!("\t\t\t{}\t; refresh\n", refresh).as_str());
        buffer.push_str(format!("\t\t\t{}\t; retry\n", retry).as_str());
        buffer.push_str(format!("\t\t\t{}\t; expiry\n", expire).as_str());
        buffer.push_str(format!("\t\t\t{} )\t; minimum\n", minimum).as_str());
    }

    buffer.push('\n');
}

fn generate_record_data(buffer: &mut String, data: &DNSRecordData) {
    match data {
        DNSRecordData::A(ipv4) => buffer.push_str(ipv4.as_str()),
        DNSRecordData::NS(ns) => buffer.push_str(&ns.to_absolute()),
        DNSRecordData::PTR(ptr) => buffer.push_str(&ptr.to_absolute()),
        // The zone header carries the SOA
        DNSRecordData::SOA { .. } => {}
    }
}

fn generate_record_lines(buffer: &mut String, records: &[DNSRecord], origin: &FQDNName) {
    // [Name]	[Class]	[Type]	[RDATA]
    for record in records {
        if matches!(record.data, DNSRecordData::SOA { .. }) {
            continue;
        }

        buffer.push_str(format!("{}\t{:?}\t{}\t",
                                owner_str(&record.name, origin),
                                record.class,
                                record.data.type_str()
        ).as_str());

        generate_record_data(buffer, &record.data);

        buffer.push('\n');
    }
}

pub fn format_dns_zone(zone: &DNSZone) -> String {
    let mut buffer = String::new();

    generate_header(&mut buffer, zone);
    generate_soa_header(&mut buffer, zone.soa());
    generate_record_lines(&mut buffer, zone.records(), zone.origin());

    buffer
}

pub fn render_forward(config: &ZoneConfig, glue: NameServerGlue) -> Result<String, ZoneError> {
    Ok(format_dns_zone(&build_forward_zone(config, glue)?))
}

pub fn render_reverse(config: &ZoneConfig) -> Result<String, ZoneError> {
    Ok(format_dns_zone(&build_reverse_zone(config)?))
}
