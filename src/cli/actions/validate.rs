use crate::hook::{validate_file, Format};
use anyhow::Result;
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct Args {
    pub target: Option<PathBuf>,
    pub format: Format,
}

/// Execute the validate action.
///
/// Findings and read failures are advisory: this never returns an error so the
/// hook runner is never blocked.
/// # Errors
/// Never; the signature matches the other actions.
pub fn execute(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();

    if let Err(err) = report(args, &mut stdout.lock(), &mut stderr.lock()) {
        warn!("Failed to write validation output: {}", err);
    }

    Ok(())
}

/// Write the validation output for `args` to `out`, and read failures to `err_out`.
///
/// # Errors
/// Returns an error only when writing to `out` or `err_out` fails.
pub fn report<O: Write, E: Write>(args: &Args, out: &mut O, err_out: &mut E) -> io::Result<()> {
    let Some(path) = args.target.as_deref() else {
        debug!("No file to validate");
        return Ok(());
    };

    if !path.exists() {
        debug!("Skipping missing file {}", path.display());
        return Ok(());
    }

    match validate_file(path) {
        Ok(report) => match args.format {
            Format::Text => write!(out, "{}", report.render()),
            Format::Json => {
                let json = serde_json::to_string(&report).map_err(io::Error::other)?;
                writeln!(out, "{json}")
            }
        },
        Err(err) => writeln!(
            err_out,
            "❌ Error validating {}: {}",
            path.display(),
            err.root_cause()
        ),
    }
}
