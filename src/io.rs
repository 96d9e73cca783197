use crate::error::ZoneError;
use crate::model::host::{DottedQuad, HostAddresses, HostRole};
use crate::AppConfig;
use anyhow::Context;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::info;

/// Asks with `prompt` until `accept` takes the answer.
///
/// Rejections are written to `output` and the question is repeated. With
/// `max_attempts` unset this only returns on success or end of input.
pub fn request_until<T, R, W, F>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    max_attempts: Option<u32>,
    mut accept: F,
) -> Result<T, ZoneError>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<T, ZoneError>,
{
    let label = prompt.trim_end_matches([':', ' ']);
    let mut attempts = 0;

    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(ZoneError::AttemptsExhausted {
                label: label.to_string(),
                attempts,
            });
        }

        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Err(ZoneError::InputClosed(label.to_string()));
        }

        attempts += 1;

        match accept(line.trim()) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }
}

/// Prompts for one address, an empty answer keeps `default`.
pub fn prompt_for_ip<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &DottedQuad,
    max_attempts: Option<u32>,
) -> Result<DottedQuad, ZoneError> {
    let prompt = format!("{} IP [{}]: ", label, default);

    request_until(input, output, &prompt, max_attempts, |answer| {
        if answer.is_empty() {
            Ok(default.clone())
        } else {
            DottedQuad::new(answer)
        }
    })
}

pub fn collect_host_addresses<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    config: &AppConfig,
) -> Result<HostAddresses, ZoneError> {
    let mut addresses = HostAddresses::new();

    for role in HostRole::iter() {
        let ip = prompt_for_ip(input, output, role.as_ref(), config.hosts.address_for(role), config.max_attempts)?;

        info!("Using {} for {}", ip, role);

        addresses.set(role, ip);
    }

    Ok(addresses)
}

pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let file = fs::File::open(path).with_context(|| format!("Failed to open configuration {:?}", path))?;

    let config = serde_json::from_reader(file).with_context(|| format!("Failed to parse configuration {:?}", path))?;

    info!("Loaded configuration from {:?}", path);

    Ok(config)
}

/// Where a rendered zone ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn is_file(&self) -> bool {
        matches!(self, OutputTarget::File(_))
    }

    pub fn write(&self, content: &str) -> anyhow::Result<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();

                stdout.write_all(content.as_bytes()).context("Failed to write zone to standard output")?;
                stdout.flush().context("Failed to flush standard output")?;
            }
            OutputTarget::File(path) => {
                fs::write(path, content).with_context(|| format!("Failed to write zone file {:?}", path))?;

                info!("Wrote {} bytes to {:?}", content.len(), path);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn default_ip() -> DottedQuad {
        DottedQuad::new("192.168.1.5").unwrap()
    }

    #[test]
    fn test_empty_answer_keeps_default() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let ip = prompt_for_ip(&mut input, &mut output, "ns1", &default_ip(), None).unwrap();

        assert_eq!(ip, default_ip());
        assert_eq!(String::from_utf8(output).unwrap(), "ns1 IP [192.168.1.5]: ");
    }

    #[test]
    fn test_answer_is_trimmed() {
        let mut input = Cursor::new("  10.0.0.1 \r\n");
        let mut output = Vec::new();

        let ip = prompt_for_ip(&mut input, &mut output, "api", &default_ip(), None).unwrap();

        assert_eq!(ip.as_str(), "10.0.0.1");
    }

    #[test]
    fn test_invalid_answer_is_asked_again() {
        let mut input = Cursor::new("192.168.1\nabc.def.1.1\n10.0.0.9\n");
        let mut output = Vec::new();

        let ip = prompt_for_ip(&mut input, &mut output, "bootstrap", &default_ip(), None).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(ip.as_str(), "10.0.0.9");
        assert_eq!(output.matches("bootstrap IP [192.168.1.5]: ").count(), 3);
        assert_eq!(output.matches("is not a valid IPv4 address").count(), 2);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut input = Cursor::new("bad\n");
        let mut output = Vec::new();

        let result = prompt_for_ip(&mut input, &mut output, "master0", &default_ip(), None);

        assert!(matches!(result, Err(ZoneError::InputClosed(label)) if label == "master0 IP [192.168.1.5]"));
    }

    #[test]
    fn test_attempts_are_capped() {
        let mut input = Cursor::new("x\ny\nz\n10.0.0.1\n");
        let mut output = Vec::new();

        let result = prompt_for_ip(&mut input, &mut output, "worker0", &default_ip(), Some(3));

        assert!(matches!(result, Err(ZoneError::AttemptsExhausted { attempts: 3, .. })));
    }

    #[test]
    fn test_request_until_custom_predicate() {
        let mut input = Cursor::new("3\n12\n");
        let mut output = Vec::new();

        let value = request_until(&mut input, &mut output, "> ", None, |answer| {
            match answer.parse::<u32>() {
                Ok(n) if n > 10 => Ok(n),
                _ => Err(ZoneError::InvalidArgument(format!("{} is too small", answer))),
            }
        }).unwrap();

        assert_eq!(value, 12);
        assert!(String::from_utf8(output).unwrap().contains("3 is too small"));
    }

    #[test]
    fn test_collect_host_addresses() {
        let config = AppConfig::default();
        let mut input = Cursor::new("\n10.0.0.2\n\n\n\n\n\n\n10.0.0.12\n");
        let mut output = Vec::new();

        let addresses = collect_host_addresses(&mut input, &mut output, &config).unwrap();

        assert_eq!(addresses.get(HostRole::Ns1), Some(&config.hosts.ns1));
        assert_eq!(addresses.get(HostRole::Api).map(|ip| ip.as_str()), Some("10.0.0.2"));
        assert_eq!(addresses.get(HostRole::Worker1).map(|ip| ip.as_str()), Some("10.0.0.12"));
        assert_eq!(String::from_utf8(output).unwrap().matches(" IP [").count(), 9);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mailbox": "hostmaster", "hosts": { "ns1": "10.9.8.7" } }"#).unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.mailbox, "hostmaster");
        assert_eq!(config.hosts.ns1.as_str(), "10.9.8.7");
        assert_eq!(config.hosts.api, AppConfig::default().hosts.api);
        assert_eq!(config.soa, AppConfig::default().soa);
    }

    #[test]
    fn test_load_config_rejects_bad_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "hosts": { "ns1": "10.9.8" } }"#).unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_write_file_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.example.com");
        let target = OutputTarget::File(path.clone());

        target.write("$TTL 1W\n").unwrap();

        assert!(target.is_file());
        assert_eq!(fs::read_to_string(path).unwrap(), "$TTL 1W\n");
    }
}
