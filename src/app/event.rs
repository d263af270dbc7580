//! Terminal event abstraction
//!
//! Runs a blocking reader that forwards crossterm events over a channel so
//! the main loop can wait on terminal input and reader messages together.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawn a task that polls the terminal and sends events through the
/// returned channel. A [`AppEvent::Tick`] is sent whenever `tick_rate`
/// passes without input.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        loop {
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(CtEvent::Mouse(mouse))
                        if matches!(mouse.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown) =>
                    {
                        AppEvent::Mouse(mouse)
                    }
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        continue;
                    }
                },
                Ok(false) => AppEvent::Tick,
                Err(e) => {
                    tracing::error!("Terminal polling failed: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
