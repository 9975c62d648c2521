// # c24-probe
//
// Startup probe for the Control24 middleware. Runs the same bootstrap the
// daemon and the OSC client run, then reports where the daemon would listen.
//
// This is a THIN integration layer: all selection and logging logic lives in
// `c24-common`.
//
// ## Configuration
//
// - `--interface NAME` / `C24_INTERFACE`: interface to bind (default: discover)
// - `-d`, `--debug`: debug level logging
// - `-o`, `--logdir DIR` / `C24_LOGDIR`: log directory (default `./logs`)
// - `--json`: print the resolved binding as JSON
//
// ## Example
//
// ```bash
// sudo c24-probe --interface en0 -o /var/log/c24
// ```

use anyhow::Result;
use c24_common::{CommonOpts, Defaults, InterfaceResolver, InterfaceSelection};
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

const DESCRIPTION: &str = "Resolve the address the Control24 daemon binds to.";

/// Exit codes for different termination scenarios
///
/// - 0: Binding resolved
/// - 1: Logging bootstrap failed
/// - 2: Interface resolution failed
#[derive(Debug, Clone, Copy)]
enum ProbeExitCode {
    Success = 0,
    BootstrapError = 1,
    ResolveError = 2,
}

impl From<ProbeExitCode> for ExitCode {
    fn from(code: ProbeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "c24-probe", version, about = DESCRIPTION, long_about = CommonOpts::about(DESCRIPTION))]
struct Cli {
    /// Network interface to bind, e.g. en0. Discovered when omitted
    #[arg(short, long, env = "C24_INTERFACE")]
    interface: Option<String>,

    /// Print the binding as JSON instead of address:port
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    common: CommonOpts,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let defaults = Defaults::default();

    let logger = match cli.common.start_logging_with("c24-probe", &defaults) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Logging bootstrap error: {}", e);
            return ProbeExitCode::BootstrapError.into();
        }
    };

    if let Err(e) = logger.install() {
        eprintln!("Logging bootstrap error: {}", e);
        return ProbeExitCode::BootstrapError.into();
    }

    info!("Logging to {}", logger.log_file().display());

    match run(&cli, &defaults) {
        Ok(()) => ProbeExitCode::Success.into(),
        Err(e) => {
            error!("Interface resolution failed: {}", e);
            ProbeExitCode::ResolveError.into()
        }
    }
}

fn run(cli: &Cli, defaults: &Defaults) -> Result<()> {
    let selection = InterfaceSelection::from(cli.interface.clone());

    let binding = InterfaceResolver::host()
        .with_default(defaults.binding())
        .resolve(&selection)?;

    if cli.json {
        println!("{}", serde_json::to_string(&binding)?);
    } else {
        println!("{}", binding.endpoint(defaults.daemon_port));
    }

    Ok(())
}
