use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use cluster_zone_generator::error::ZoneError;
use cluster_zone_generator::io::{collect_host_addresses, load_config, OutputTarget};
use cluster_zone_generator::model::dns::FQDNName;
use cluster_zone_generator::model::host::HostAddresses;
use cluster_zone_generator::model::zone::{serial_now, ZoneConfig};
use cluster_zone_generator::task::{run_tasks, GenerateOptions};
use cluster_zone_generator::AppConfig;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Generate forward and reverse BIND zone files for a cluster.
///
/// Asks for the address of every cluster host, pressing enter keeps the
/// default shown in brackets.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Cluster domain, e.g. mycluster.example.org
    #[arg(short, long, value_name = "FQDN", required_unless_present = "print_defaults")]
    domain: Option<String>,

    /// Forward zone file (standard output when omitted)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Reverse zone file (no reverse zone when omitted)
    #[arg(short, long, value_name = "PATH")]
    reverse: Option<PathBuf>,

    /// JSON file with default addresses and SOA timers
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Accept every default address without asking
    #[arg(short = 'y', long)]
    use_defaults: bool,

    /// Print the built-in configuration as JSON and exit
    #[arg(long)]
    print_defaults: bool,
}

fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        let code = match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
            _ => 1,
        };

        // Help goes to stdout, errors with usage to stderr
        let _ = e.print();

        std::process::exit(code);
    })
}

fn exit_with_usage(err: &ZoneError) -> ! {
    eprintln!("error: {}\n\n{}", err, Cli::command().render_usage());

    std::process::exit(1);
}

fn parse_domain(domain: Option<&str>) -> Result<FQDNName, ZoneError> {
    let domain = domain.ok_or_else(|| ZoneError::InvalidArgument("missing required option -d <FQDN>".to_string()))?;

    let fqdn = FQDNName::from_str(domain)?;

    if fqdn.is_wildcard() {
        return Err(ZoneError::InvalidArgument(format!("'{}' is a wildcard name, not a cluster domain", domain)));
    }

    // The name server lives one level up
    fqdn.parent()?;

    Ok(fqdn)
}

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    if cli.print_defaults {
        println!("{}", serde_json::to_string_pretty(&AppConfig::default())?);

        return Ok(());
    }

    let fqdn = parse_domain(cli.domain.as_deref()).unwrap_or_else(|e| exit_with_usage(&e));

    let app_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let addresses = if cli.use_defaults {
        info!("Using default addresses for every host");

        HostAddresses::from_defaults(&app_config.hosts)
    } else {
        let mut input = std::io::stdin().lock();
        let mut prompt = std::io::stderr().lock();

        collect_host_addresses(&mut input, &mut prompt, &app_config)?
    };

    let zone_config = ZoneConfig::new(
        fqdn,
        serial_now(),
        &app_config.mailbox,
        app_config.soa.clone(),
        &addresses,
        &app_config.hosts,
    )?;

    info!("Generating zones for {} (serial {})", zone_config.fqdn(), zone_config.serial());

    let options = GenerateOptions {
        forward: cli.output.map(OutputTarget::File).unwrap_or(OutputTarget::Stdout),
        reverse: cli.reverse,
    };

    run_tasks(&options, &zone_config)
}
