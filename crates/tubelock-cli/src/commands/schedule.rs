use clap::Subcommand;
use tubelock_core::policy::{Clock, ScheduleWindow};
use tubelock_core::settings::{FileStore, SettingsStore};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Set the daily window (start inclusive, end exclusive; wraps past
    /// midnight when start > end)
    Set {
        /// Window start, "HH:MM" 24-hour local time
        #[arg(long)]
        start: String,
        /// Window end, "HH:MM"
        #[arg(long)]
        end: String,
    },
    /// Enable the daily window
    Enable,
    /// Disable the daily window
    Disable,
    /// Print the schedule settings
    Show,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open()?;
    let mut settings = store.load_or_default();

    match action {
        ScheduleAction::Set { start, end } => {
            // The engine tolerates malformed strings (the window just
            // never activates), but as the producer we reject them.
            if !ScheduleWindow::parse(&start, &end).is_valid() {
                return Err(format!("'{start}'..'{end}' is not a valid HH:MM window").into());
            }
            settings.schedule_block_start = start;
            settings.schedule_block_end = end;
            store.save(&settings)?;
            println!("ok");
        }
        ScheduleAction::Enable => {
            settings.schedule_block_enabled = true;
            store.save(&settings)?;
            println!("schedule enabled");
        }
        ScheduleAction::Disable => {
            settings.schedule_block_enabled = false;
            store.save(&settings)?;
            println!("schedule disabled");
        }
        ScheduleAction::Show => {
            let window =
                ScheduleWindow::parse(&settings.schedule_block_start, &settings.schedule_block_end);
            let payload = serde_json::json!({
                "scheduleBlockEnabled": settings.schedule_block_enabled,
                "scheduleBlockStart": settings.schedule_block_start,
                "scheduleBlockEnd": settings.schedule_block_end,
                "activeNow": settings.schedule_block_enabled
                    && window.contains(Clock::now().time_of_day),
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}
