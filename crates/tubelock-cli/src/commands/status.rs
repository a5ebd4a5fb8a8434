use tubelock_core::policy::{evaluate, format_remaining, remaining_ms, Clock, PolicyInputs};
use tubelock_core::settings::{FileStore, SettingsStore};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    let settings = store.load_or_default();

    let clock = Clock::now();
    let state = evaluate(&PolicyInputs::from(&settings), &clock);
    let left = state
        .ends_at_ms()
        .map(|end| remaining_ms(end, clock.epoch_ms))
        .unwrap_or(0);

    let payload = serde_json::json!({
        "blocked": state.is_blocked(),
        "state": state,
        "countdown": format_remaining(left),
        "extensionEnabled": settings.extension_enabled,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
