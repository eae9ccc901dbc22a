//! drift - terminal ambient-noise player
//!
//! Run with: cargo run

mod app;
mod ui;

use app::Drift;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let terminal = ratatui::init();
    let result = Drift::new().run(terminal);
    ratatui::restore();
    result
}
