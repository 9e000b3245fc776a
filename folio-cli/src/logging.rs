//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables debug output for the
/// folio crates and `-vv` enables trace output.
pub fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "folio_layout=debug,folio_render=debug,folio=debug",
            _ => "folio_layout=trace,folio_render=trace,folio=trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
