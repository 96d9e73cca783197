use crate::model::host::DottedQuad;
use std::fmt;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A domain name as written, stored without its trailing dot.
///
/// Comparison and hashing ignore ASCII case.
#[derive(Debug, Clone)]
pub struct FQDNName(String);

impl PartialEq for FQDNName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for FQDNName {}

impl Hash for FQDNName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FQDNError {
    EmptyInput,
    LabelEmpty,
    LabelTooLong(String),
    InvalidLabelStart(String),
    InvalidLabelEnd(String),
    InvalidCharacter(char, String),
    MisplacedWildcard,
    NoParent(String),
}

impl Display for FQDNError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FQDNError::EmptyInput => write!(f, "Domain name cannot be empty"),
            FQDNError::LabelEmpty => write!(f, "Domain label cannot be empty (e.g., '..')"),
            FQDNError::LabelTooLong(l) => write!(f, "Label '{}' exceeds 63 characters", l),
            FQDNError::InvalidLabelStart(l) => write!(f, "Label '{}' must start with a letter or digit", l),
            FQDNError::InvalidLabelEnd(l) => write!(f, "Label '{}' must end with a letter or digit", l),
            FQDNError::InvalidCharacter(c, l) => write!(f, "Label '{}' contains invalid character '{}'", l, c),
            FQDNError::MisplacedWildcard => write!(f, "Wildcard '*' is only allowed as the leftmost label"),
            FQDNError::NoParent(n) => write!(f, "Domain '{}' has no parent domain", n),
        }
    }
}

impl std::error::Error for FQDNError {}

impl FQDNName {
    pub fn new(name: &str) -> Result<Self, FQDNError> {
        if name.trim().is_empty() {
            return Err(FQDNError::EmptyInput);
        }

        let to_validate = name.strip_suffix('.').unwrap_or(name);

        if to_validate.is_empty() {
            return Err(FQDNError::EmptyInput);
        }

        for (index, label) in to_validate.split('.').enumerate() {
            if label == "*" {
                if index != 0 {
                    return Err(FQDNError::MisplacedWildcard);
                }
                continue;
            }

            Self::validate_label(label)?;
        }

        Ok(FQDNName(to_validate.to_string()))
    }

    fn validate_label(label: &str) -> Result<(), FQDNError> {
        if label.len() > 63 {
            return Err(FQDNError::LabelTooLong(label.to_string()));
        }
        if label.is_empty() {
            return Err(FQDNError::LabelEmpty);
        }

        let chars: Vec<char> = label.chars().collect();

        // Labels may start with a digit (reverse zones, 3com.com, ...)
        if !chars[0].is_ascii_alphanumeric() {
            return Err(FQDNError::InvalidLabelStart(label.to_string()));
        }

        if !chars[chars.len() - 1].is_ascii_alphanumeric() {
            return Err(FQDNError::InvalidLabelEnd(label.to_string()));
        }

        for &c in &chars {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(FQDNError::InvalidCharacter(c, label.to_string()));
            }
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with its trailing root dot, as written in zone files.
    pub fn to_absolute(&self) -> String {
        format!("{}.", self.0)
    }

    /// `*.apps.example.com` is a wildcard owner, never a zone name.
    pub fn is_wildcard(&self) -> bool {
        self.labels().next() == Some("*")
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Strips the leftmost label: `ocp4.example.com` -> `example.com`.
    pub fn parent(&self) -> Result<FQDNName, FQDNError> {
        match self.0.split_once('.') {
            Some((_, rest)) => FQDNName::new(rest),
            None => Err(FQDNError::NoParent(self.0.clone())),
        }
    }

    /// Prepends `label` to this name: `master0` + `ocp4.example.com`.
    pub fn child(&self, label: &str) -> Result<FQDNName, FQDNError> {
        FQDNName::new(&format!("{}.{}", label, self.0))
    }

    pub fn is_child_of(&self, parent: &FQDNName) -> bool {
        let self_labels: Vec<&str> = self.labels().collect();
        let parent_labels: Vec<&str> = parent.labels().collect();

        if self_labels.len() <= parent_labels.len() {
            return false;
        }

        let start_index = self_labels.len() - parent_labels.len();
        self_labels[start_index..]
            .iter()
            .zip(&parent_labels)
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl FromStr for FQDNName {
    type Err = FQDNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FQDNName::new(s)
    }
}

impl Display for FQDNName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DNSRecordData {
    A(DottedQuad),
    NS(FQDNName),
    SOA {
        mname: FQDNName, // Primary NS
        rname: String,   // Admin mailbox, relative to the origin
        serial: u32,
        refresh: String,
        retry: String,
        expire: String,
        minimum: String,
    },
    PTR(FQDNName),
}

impl DNSRecordData {
    pub fn type_str(&self) -> &'static str {
        match self {
            DNSRecordData::A(_) => "A",
            DNSRecordData::NS(_) => "NS",
            DNSRecordData::SOA { .. } => "SOA",
            DNSRecordData::PTR(_) => "PTR",
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum DNSClass {
    IN,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DNSRecord {
    pub name: FQDNName,
    pub class: DNSClass,
    pub data: DNSRecordData,
}

impl DNSRecord {
    pub fn new(name: FQDNName, data: DNSRecordData) -> Self {
        DNSRecord {
            name,
            class: DNSClass::IN,
            data,
        }
    }
}

/// One zone file: header values, the SOA and its records in output order.
#[derive(Debug, Clone)]
pub struct DNSZone {
    origin: FQDNName,
    ttl: String,
    soa: DNSRecordData,
    records: Vec<DNSRecord>,
    declares_origin: bool,
}

impl DNSZone {
    pub fn new(origin: FQDNName, ttl: String, soa: DNSRecordData) -> Self {
        // Only `parser::zone` builds zones, always with SOA data
        debug_assert!(matches!(soa, DNSRecordData::SOA { .. }), "SOA record data is required for DNSZone");

        DNSZone {
            origin,
            ttl,
            soa,
            records: Vec::new(),
            declares_origin: false,
        }
    }

    /// Writes a `$ORIGIN` directive, for zones whose name is derived rather than given.
    pub fn declaring_origin(mut self) -> Self {
        self.declares_origin = true;
        self
    }

    pub fn declares_origin(&self) -> bool {
        self.declares_origin
    }

    pub fn origin(&self) -> &FQDNName {
        &self.origin
    }

    pub fn ttl(&self) -> &str {
        &self.ttl
    }

    pub fn soa(&self) -> &DNSRecordData {
        &self.soa
    }

    pub fn records(&self) -> &[DNSRecord] {
        &self.records
    }

    pub fn add_record(&mut self, record: DNSRecord) {
        self.records.push(record);
    }

    #[cfg(test)]
    pub(crate) fn count_records(&self, type_str: &str) -> usize {
        self.records.iter().filter(|r| r.data.type_str() == type_str).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_normalization() {
        let name = FQDNName::new("OCP4.Example.COM.").unwrap();

        assert_eq!(name.as_str(), "OCP4.Example.COM");
        assert_eq!(name.to_absolute(), "OCP4.Example.COM.");
        assert_eq!(name, FQDNName::new("ocp4.example.com").unwrap());
        assert_eq!(name.parent().unwrap().as_str(), "Example.COM");
    }

    #[test]
    fn test_fqdn_rejects_bad_labels() {
        assert_eq!(FQDNName::new(""), Err(FQDNError::EmptyInput));
        assert_eq!(FQDNName::new("."), Err(FQDNError::EmptyInput));
        assert_eq!(FQDNName::new("a..b"), Err(FQDNError::LabelEmpty));
        assert_eq!(FQDNName::new("-abc.com"), Err(FQDNError::InvalidLabelStart("-abc".to_string())));
        assert_eq!(FQDNName::new("abc-.com"), Err(FQDNError::InvalidLabelEnd("abc-".to_string())));
        assert_eq!(FQDNName::new("a_b.com"), Err(FQDNError::InvalidCharacter('_', "a_b".to_string())));
        assert!(matches!(FQDNName::new(&"a".repeat(64)), Err(FQDNError::LabelTooLong(_))));
    }

    #[test]
    fn test_fqdn_wildcard_only_leftmost() {
        let wildcard = FQDNName::new("*.apps.ocp4.example.com").unwrap();
        assert_eq!(wildcard.to_absolute(), "*.apps.ocp4.example.com.");

        assert!(wildcard.is_wildcard());
        assert!(!FQDNName::new("apps.ocp4.example.com").unwrap().is_wildcard());

        assert_eq!(FQDNName::new("apps.*.example.com"), Err(FQDNError::MisplacedWildcard));
    }

    #[test]
    fn test_fqdn_reverse_names() {
        let name = FQDNName::new("97.1.168.192.in-addr.arpa.").unwrap();
        let zone = FQDNName::new("1.168.192.in-addr.arpa").unwrap();

        assert!(name.is_child_of(&zone));
        assert!(!zone.is_child_of(&name));
        assert!(!zone.is_child_of(&zone));
        assert!(FQDNName::new("97.1.168.192.IN-ADDR.arpa").unwrap().is_child_of(&zone));
    }

    #[test]
    fn test_fqdn_parent() {
        let name = FQDNName::new("test.example.com").unwrap();

        assert_eq!(name.parent().unwrap().as_str(), "example.com");
        assert_eq!(
            FQDNName::new("localhost").unwrap().parent(),
            Err(FQDNError::NoParent("localhost".to_string()))
        );
    }

    #[test]
    fn test_fqdn_child() {
        let name = FQDNName::new("ocp4.example.com").unwrap();

        assert_eq!(name.child("master0").unwrap().as_str(), "master0.ocp4.example.com");
        assert_eq!(name.child("*.apps").unwrap().as_str(), "*.apps.ocp4.example.com");
        assert!(name.child("bad_label").is_err());
    }
}
