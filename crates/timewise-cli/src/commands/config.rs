use clap::Subcommand;
use timewise_core::{data_dir, Config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "sequencer.start_at", "logging.level")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(&dir)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&dir)?;
            config.set(&key, &value)?;
            config.save_to(&dir)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load_from(&dir)?;
            for (key, value) in config.entries() {
                println!("{key} = {value:?}");
            }
        }
        ConfigAction::Reset => {
            Config::default().save_to(&dir)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
