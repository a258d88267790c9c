use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("padwork=debug,warn")
        } else {
            EnvFilter::new("padwork=info,warn")
        }
    })
}

/// Initialize tracing.
///
/// With `log_path` set, events are appended to that file (the terminal is
/// busy with the UI); without it nothing is installed. `RUST_LOG` overrides
/// the `verbose` level. Calling this twice keeps the first subscriber.
pub fn init_logging(log_path: Option<&Path>, verbose: bool) -> std::io::Result<()> {
    let Some(path) = log_path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn no_path_is_a_no_op() {
        assert!(init_logging(None, false).is_ok());
    }

    #[test]
    fn creates_the_log_file_and_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("padwork.log");
        init_logging(Some(&path), true).unwrap();
        assert!(path.exists());
    }
}
