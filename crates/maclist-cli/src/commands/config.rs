use anyhow::Result;
use maclist_config::Config;

pub fn handle(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
