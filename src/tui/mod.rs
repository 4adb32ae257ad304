pub mod events;
pub mod terminal;

pub use events::{Event, EventStream};
pub use terminal::Terminal;

use crate::error::Result;
use crate::message::Message;
use crate::picker::Picker;
use crate::update::update;
use crate::view;
use std::time::Duration;

/// Runs `picker` full-screen until it is confirmed or cancelled.
///
/// Returns the chosen item indices, or `None` when cancelled. An empty
/// picker returns `None` without touching the terminal.
pub async fn run_picker(mut picker: Picker) -> Result<Option<Vec<usize>>> {
    if picker.items.is_empty() {
        return Ok(None);
    }

    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new(Duration::from_millis(250));

    while picker.running {
        terminal.draw(|frame| view::render(&mut picker, frame))?;

        match events.next().await {
            Some(event) => {
                let msg = match event {
                    Event::Key(key) => Message::Key(key),
                    Event::Tick => Message::Tick,
                    Event::Resize(_, _) => Message::Tick, // Trigger redraw
                };
                update(&mut picker, msg);
            }
            // Input closed
            None => picker.cancel(),
        }
    }

    Ok(picker.result)
}
