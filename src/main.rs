mod api;
mod cli;
mod config;
mod ddns;
mod ip;
#[cfg(test)]
mod tests;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use api::models::UpdateOutcome;
use api::DnsError;
use clap::Parser;
use cli::Cli;
use config::Config;
use ddns::HetznerDdns;
use env_logger::Env;
use log::error;

/// Applied to every outgoing HTTP request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const EXIT_CONFIG: u8 = 1;
const EXIT_UPDATE_FAILED: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_config_template {
        println!("{}", config::template(&cli.config_locations()));
        return ExitCode::SUCCESS;
    }

    // Nothing touches the network until the configuration is complete.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(code) => return ExitCode::from(code),
    };

    let ddns = match HetznerDdns::new(config) {
        Ok(ddns) => ddns,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_UPDATE_FAILED);
        }
    };

    let result = ddns.run_once().await;
    report(&result);
    ExitCode::from(exit_status(&result))
}

/// Loads and validates the configuration, printing the template on failure.
fn load_config(cli: &Cli) -> Result<Config, u8> {
    let locations = cli.config_locations();

    let mut config = config::load(&locations).map_err(|e| {
        error!("{}", e);
        eprintln!("{}", config::template(&locations));
        EXIT_CONFIG
    })?;

    if let Some(ttl) = cli.ttl {
        config.ttl = ttl;
    }
    Ok(config)
}

fn report(result: &Result<UpdateOutcome>) {
    match result {
        Ok(UpdateOutcome::Updated(id)) => println!("record {} successfully updated.", id),
        Ok(UpdateOutcome::Disabled) => println!("updates disabled, no API URL configured."),
        Err(e) => {
            if let Some(DnsError::Rejected { message, .. }) = e.downcast_ref::<DnsError>() {
                println!("{}", message);
            }
        }
    }
}

fn exit_status(result: &Result<UpdateOutcome>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => EXIT_UPDATE_FAILED,
    }
}
