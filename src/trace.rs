use std::{fs, fs::File, path::PathBuf, sync::Arc};

use color_eyre::Result;
use directories::BaseDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn log_path() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.data_local_dir().join("gazetteer").join("gazetteer.log"))
}

/// Sets up logging to `<data local dir>/gazetteer/gazetteer.log`. The TUI
/// owns stdout and stderr, so nothing is ever logged to the terminal.
/// `GAZETTEER_LOG` overrides the verbosity flags with a full filter directive.
pub fn init(verbosity: u8) -> Result<()> {
    let Some(path) = log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&path)?;

    let directive = match verbosity {
        0 => "gazetteer=info",
        1 => "gazetteer=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("GAZETTEER_LOG").unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .with(ErrorLayer::default())
        .init();
    Ok(())
}
