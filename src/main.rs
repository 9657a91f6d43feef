use {
    anyhow::Result,
    wayland_triangle::{application::Application, config::Config, logging},
};

fn main() -> Result<()> {
    let _logger = logging::setup()?;
    let config = Config::from_env();
    log::debug!("{:#?}", config);

    Application::new(config)?.run()?;

    log::info!("exiting");
    Ok(())
}
