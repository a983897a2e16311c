use std::{fs, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use cert_request_guard::{
    CertificateRequest, OutcomeStatus, ValidationSettings, validate_certificate_request,
};
use log::debug;

const USAGE: &str = "usage: check_request <request.json> [--confirm]";

struct Args {
    path: String,
    confirmed: bool,
}

fn parse_args() -> Result<Args> {
    let mut path = None;
    let mut confirmed = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--confirm" => confirmed = true,
            "-h" | "--help" => return Err(anyhow!(USAGE)),
            _ if path.is_none() => path = Some(arg),
            _ => return Err(anyhow!("unexpected argument {arg}\n{USAGE}")),
        }
    }
    let path = path.ok_or_else(|| anyhow!(USAGE))?;
    Ok(Args { path, confirmed })
}

async fn run() -> Result<OutcomeStatus> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read request file {}", args.path))?;
    let request: CertificateRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse request file {}", args.path))?;

    let settings = ValidationSettings::from_env();
    debug!("[validation] using settings {settings:?}");

    let response = validate_certificate_request(request, settings, args.confirmed)
        .await
        .map_err(|err| anyhow!(err))?;

    let rendered =
        serde_json::to_string_pretty(&response).context("Failed to render validation result")?;
    println!("{rendered}");
    Ok(response.report.status)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(OutcomeStatus::Ready) => ExitCode::SUCCESS,
        Ok(OutcomeStatus::RuleViolation) => ExitCode::from(2),
        Ok(OutcomeStatus::NeedsConfirmation) => ExitCode::from(3),
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
