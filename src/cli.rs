use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Point a Hetzner DNS A record at this host's public IP", long_about = None)]
pub struct Cli {
    /// Configuration file to use instead of the default locations
    #[arg(short, long, value_name = "PATH", env = "HETZNER_DYNDNS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the record TTL from the configuration file
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u32).range(1..))]
    pub ttl: Option<u32>,

    /// Print a configuration template and exit
    #[arg(long, action, default_value_t = false)]
    pub print_config_template: bool,
}

impl Cli {
    pub fn config_locations(&self) -> Vec<PathBuf> {
        match &self.config {
            Some(path) => vec![path.clone()],
            None => crate::config::default_locations(),
        }
    }
}
