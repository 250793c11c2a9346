use clap::Subcommand;
use timewise_core::settings::SETTING_KEYS;
use timewise_core::Settings;

use super::Session;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a setting value
    Get {
        /// Setting key (e.g. "bufferMinutes")
        key: String,
    },
    /// Set a setting value; out-of-range values are clamped
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let now = session.now();
    match action {
        SettingsAction::Get { key } => match session.planner.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown setting: {key}").into()),
        },
        SettingsAction::Set { key, value } => {
            let stored = session.planner.set_setting(&key, &value, now)?;
            session.save()?;
            println!("{key} = {stored}");
        }
        SettingsAction::List => {
            let settings = session.planner.settings();
            for key in SETTING_KEYS {
                if let Some(value) = settings.get(key) {
                    println!("{key} = {value}");
                }
            }
        }
        SettingsAction::Reset => {
            session.planner.replace_settings(Settings::default(), now);
            session.save()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
