use anyhow::Result;

use pagesnap_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if write {
        config.save()?;
        println!("Wrote {}", AppConfig::config_path().display());
    } else {
        print!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}
