//! Netsweep binary entry point.

use clap::Parser;
use netsweep::cli::Args;
use netsweep::error::ScanError;
use netsweep::output;
use netsweep::scanner::NetworkScanner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let request = match args.to_request() {
        Ok(request) => request,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(2);
        }
    };

    let scanner = NetworkScanner::new();
    let cancel = scanner.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            output::print_warning("interrupt received; finishing in-flight probes");
            cancel.cancel();
        }
    });

    let report = match scanner.scan(&request).await {
        Ok(report) => report,
        Err(e @ (ScanError::InvalidTarget(_) | ScanError::InvalidPortSpec(_))) => {
            output::print_error(&e.to_string());
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    output::print_report(&report, args.output).map_err(ScanError::Io)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "netsweep=debug" } else { "netsweep=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
