use std::path::Path;

use anyhow::Context;
use desk_config::DeskConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config (or the `--config` file).
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DeskConfig> {
    load_dotenv()?;

    match flags.config.as_deref() {
        Some(path) => DeskConfig::load_from(Path::new(path))
            .with_context(|| format!("failed to load config file {path}")),
        None => DeskConfig::load().context("failed to load desk configuration"),
    }
}

fn load_dotenv() -> anyhow::Result<()> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
