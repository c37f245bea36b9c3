use std::process::ExitCode;

use plone_qrcode::cli::Cli;
use plone_qrcode::error::ConfigError;
use plone_qrcode::{app, logger};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logger::init_cli_logger(cli.verbosity());

    let result = cli
        .resolve()
        .map_err(anyhow::Error::from)
        .and_then(|config| app::run(&config));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Input(errors)) => {
            for error in &errors.0 {
                eprintln!("error: {error}");
            }
        }
        _ => eprintln!("error: {err:#}"),
    }
}
