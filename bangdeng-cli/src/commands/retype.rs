use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use bangdeng_etl::{backup_path, retype_csv};

use crate::CliError;

pub(crate) fn run_retype(csv: &Path) -> Result<(), CliError> {
    let changed = retype_csv(csv)?;
    log::info!(
        "{} {} rows retyped in {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        changed,
        csv.display(),
    );
    log::info!("  Backup: {}", backup_path(csv).display());
    Ok(())
}
