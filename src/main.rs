use anyhow::Context;
use cfn_sphere::config::{Config, LogFormat, LoggingConfig, ServerTimeConfig};
use cfn_sphere::server_time::{remote_time_from, HttpDateHeaderSource};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

/// cfn-util - CloudFormation template and API helpers
#[derive(Parser, Debug)]
#[command(name = "cfn-util")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format (overrides the configuration file)
    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a YAML document to JSON ("-" reads stdin)
    YamlToJson { input: PathBuf },
    /// Convert a JSON document to YAML ("-" reads stdin)
    JsonToYaml { input: PathBuf },
    /// Print the CloudFormation API server time (UTC)
    ServerTime {
        /// Endpoint to read the Date header from
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormatArg {
    Json,
    Text,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = args
        .config
        .as_ref()
        .map(Config::from_file)
        .transpose()
        .context("Failed to load configuration")?;

    let mut logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);
    if let Some(format) = args.log_format {
        logging.format = format.into();
    }
    cfn_sphere::logging::init_subscriber(&logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    if let Some(path) = &args.config {
        tracing::debug!(config_file = %path.display(), "Configuration loaded successfully");
    }

    match args.command {
        Command::YamlToJson { input } => {
            let text = read_input(&input)?;
            println!("{}", cfn_sphere::convert_yaml_to_json_string(&text)?);
        }
        Command::JsonToYaml { input } => {
            let text = read_input(&input)?;
            print!("{}", cfn_sphere::convert_json_to_yaml_string(&text)?);
        }
        Command::ServerTime { endpoint } => {
            let mut server_time = config
                .map(|c| c.server_time)
                .unwrap_or_else(ServerTimeConfig::default);
            if let Some(endpoint) = endpoint {
                server_time.endpoint = endpoint;
            }

            let source = HttpDateHeaderSource::new(&server_time)?;
            let timestamp = remote_time_from(&source)
                .with_context(|| format!("Failed to read server time from {}", source.endpoint()))?;
            println!("{}", timestamp.format("%Y-%m-%dT%H:%M:%S"));
        }
    }

    Ok(())
}
