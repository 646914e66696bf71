//! Binary entry point: resolve the configuration, start file logging, open the
//! store and drive the Ratatui event loop until the user exits.
use tabletop_rpg_manager::{init_file_logger, run_app, App, AppConfig, Session};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_file_logger(&config.log_path)?;
    info!(
        db = %config.db_path.display(),
        policy = ?config.equip_policy,
        "starting tabletop RPG manager"
    );

    let session = Session::open(&config)?;
    let mut app = App::new(session);
    run_app(&mut app)
}
