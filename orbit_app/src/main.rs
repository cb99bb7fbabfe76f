//! Headless overlap scene driver
//!
//! Usage: `orbit_app [config.toml|config.ron]`

mod app;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1);
    let mut app = app::OrbitApp::new(config_path.as_deref())?;
    app.run()?;
    Ok(())
}
