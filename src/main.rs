//! pedigree-details - clinical details editor for pedigree terms
//!
//! Edits the cancers of one pedigree member: qualifier dialogues per term,
//! the colored cancer legend, and candidate genes resolved through HGNC.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::logging::LogConfig;
use crate::services::VocabularyClient;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let config = Config::load();

    // Logs go to a file; the terminal belongs to the UI
    let log_config = LogConfig::from_level_name(&config.log_level).with_log_file(Config::log_path());
    logging::init_logging(&log_config)?;

    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "could not write the default config");
    }

    let vocabulary = Arc::new(VocabularyClient::new(config.endpoints())?);
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    let mut app = App::new(config, vocabulary.clone(), vocabulary)?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(tick_rate);
    tui.enter()?;

    app.init()?;
    tracing::info!(subject = app.config.subject_id, "details editor started");

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "details editor failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
