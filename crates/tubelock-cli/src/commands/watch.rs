//! The live engine loop.
//!
//! Runs the policy engine at the fixed 1-second period against a
//! console rendition of the overlay. Settings changes made by another
//! process (or another terminal running `tubelock block start`) are
//! picked up by reloading the file each tick and diffing against the
//! previous snapshot -- the pull analogue of the store's push
//! subscription. A reload failure keeps the last good snapshot; the
//! loop itself never stops for it.

use std::io::Write;
use std::time::Duration;

use tubelock_core::overlay::{Surface, SurfaceError};
use tubelock_core::policy::Clock;
use tubelock_core::settings::{FileStore, SettingsStore};
use tubelock_core::{Event, PolicyEngine, Settings};

/// Terminal stand-in for the page overlay. There is nothing to tamper
/// with here, so `is_topmost` is always true and the watchdog branch
/// only ever fires for external unmounts (which a terminal cannot do).
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    mounted: bool,
}

impl Surface for ConsoleSurface {
    fn mount(&mut self, title: &str, message: &str) -> Result<(), SurfaceError> {
        println!();
        println!("==========================================");
        println!("  {title}");
        println!("  {message}");
        println!("==========================================");
        self.mounted = true;
        Ok(())
    }

    fn set_countdown(&mut self, text: &str) {
        print!("\r  {text}    ");
        let _ = std::io::stdout().flush();
    }

    fn unmount(&mut self) {
        if self.mounted {
            println!();
            println!("  -- unblocked --");
        }
        self.mounted = false;
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn is_topmost(&self) -> bool {
        true
    }

    fn raise(&mut self) {}

    fn suppress_page(&mut self) {
        log::debug!("page suppressed");
    }

    fn restore_page(&mut self) {
        log::debug!("page restored");
    }
}

pub fn run(ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    let mut last: Settings = store.load_or_default();
    let mut engine = PolicyEngine::new(last.clone(), ConsoleSurface::default());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut elapsed_ticks = 0u64;
        loop {
            interval.tick().await;
            let clock = Clock::now();

            match store.load() {
                Ok(current) => {
                    let delta = last.diff(&current);
                    if !delta.is_empty() {
                        for event in engine.apply_settings_change(&delta, &clock) {
                            print_event(&event);
                        }
                        last = current;
                    }
                }
                Err(e) => log::warn!("settings reload failed, keeping last snapshot: {e}"),
            }

            for event in engine.tick(&clock) {
                print_event(&event);
            }

            elapsed_ticks += 1;
            if let Some(limit) = ticks {
                if elapsed_ticks >= limit {
                    break;
                }
            }
        }
    });
    Ok(())
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("event serialization failed: {e}"),
    }
}
