//! Temporary block control.
//!
//! These commands play the popup's role from the settings contract:
//! they only ever write `tempBlockUntil`. The engine picks the change
//! up on its next reload and never clears the key itself.

use clap::{Subcommand, ValueEnum};
use tubelock_core::policy::{format_remaining, remaining_ms, Clock};
use tubelock_core::settings::{FileStore, SettingsStore};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Block for a custom number of minutes
    Start {
        /// Duration in minutes
        #[arg(long)]
        minutes: u64,
    },
    /// Block for a preset duration
    Preset {
        /// Preset duration in minutes
        #[arg(value_enum)]
        duration: PresetDuration,
    },
    /// Cancel the temporary block
    Cancel,
    /// Print the remaining temporary block time
    Remaining,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetDuration {
    #[value(name = "5")]
    Five,
    #[value(name = "15")]
    Fifteen,
    #[value(name = "30")]
    Thirty,
    #[value(name = "60")]
    Sixty,
}

impl PresetDuration {
    fn minutes(self) -> u64 {
        match self {
            PresetDuration::Five => 5,
            PresetDuration::Fifteen => 15,
            PresetDuration::Thirty => 30,
            PresetDuration::Sixty => 60,
        }
    }
}

pub fn run(action: BlockAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open()?;
    let mut settings = store.load_or_default();

    match action {
        BlockAction::Start { minutes } => start(&mut store, &mut settings, minutes)?,
        BlockAction::Preset { duration } => start(&mut store, &mut settings, duration.minutes())?,
        BlockAction::Cancel => {
            settings.temp_block_until = 0;
            store.save(&settings)?;
            println!("temporary block cancelled");
        }
        BlockAction::Remaining => {
            let left = remaining_ms(settings.temp_block_until, Clock::now().epoch_ms);
            println!("{}", format_remaining(left));
        }
    }
    Ok(())
}

fn start(
    store: &mut FileStore,
    settings: &mut tubelock_core::Settings,
    minutes: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if minutes == 0 {
        return Err("duration must be at least one minute".into());
    }
    let until = Clock::now().epoch_ms + minutes * 60_000;
    settings.temp_block_until = until;
    store.save(settings)?;

    let payload = serde_json::json!({
        "tempBlockUntil": until,
        "minutes": minutes,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
