use clap::Subcommand;
use tubelock_core::settings::{FileStore, Settings, SettingsStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Storage key (e.g. "extensionEnabled", "tempBlockUntil")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Storage key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings values
    List,
    /// Print the settings file path
    Path,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open()?;

    match action {
        ConfigAction::Get { key } => {
            let settings = store.load_or_default();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key} (expected one of {})", Settings::keys().join(", "));
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = store.load_or_default();
            settings.set(&key, &value)?;
            store.save(&settings)?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = store.load_or_default();
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{json}");
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
        ConfigAction::Reset => {
            store.save(&Settings::default())?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
