use ratatui::layout::Rect;

use crate::{
    config::PickerConfig,
    matcher::{self, MatchSegment},
    store::Command,
    trigger::{self, TriggerScan},
};

/// One rendered dropdown option: a command plus its highlighted name.
#[derive(Clone, Debug)]
pub struct DropdownEntry {
    pub id: String,
    pub name: String,
    pub command: String,
    pub segments: Vec<MatchSegment>,
}

/// Transient state of an open dropdown session. At most one session exists
/// at a time; the App holds it in a single `Option` slot and dropping it
/// releases the overlay entirely.
#[derive(Clone, Debug)]
pub struct DropdownSession {
    query: String,
    entries: Vec<DropdownEntry>,
    focus: usize,
}

/// What [`sync_session`] did to the session slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    Opened,
    Refreshed,
    Closed,
}

impl DropdownSession {
    fn new() -> Self {
        Self {
            query: String::new(),
            entries: Vec::new(),
            focus: 0,
        }
    }

    /// Re-filters against the current command set and re-renders. Focus
    /// always returns to the first option.
    pub fn refresh(&mut self, commands: &[Command], query: &str) {
        self.query = query.to_string();
        self.entries = matcher::filter(commands, query)
            .into_iter()
            .map(|command| DropdownEntry {
                id: command.id.clone(),
                name: command.name.clone(),
                command: command.command.clone(),
                segments: matcher::highlight(&command.name, query),
            })
            .collect();
        self.focus = 0;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[DropdownEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus by `delta`, wrapping first↔last. Exactly one option is
    /// focused at any time.
    pub fn move_focus(&mut self, delta: i32) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as i32;
        self.focus = (self.focus as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.entries.len() {
            self.focus = index;
        }
    }

    pub fn focused(&self) -> Option<&DropdownEntry> {
        self.entries.get(self.focus)
    }

    /// Drops the last character of the query and returns the rewritten
    /// input value (`trigger` + query) plus whether the session should
    /// close because the query became empty.
    pub fn backspace_query(&mut self, trigger: char) -> (String, bool) {
        self.query.pop();
        let value = format!("{trigger}{}", self.query);
        (value, self.query.is_empty())
    }
}

/// Applies the trigger scan for the current input value to the session
/// slot: opens, re-filters, or closes the session. This is the single entry
/// point for input-change events.
pub fn sync_session(
    slot: &mut Option<DropdownSession>,
    value: &str,
    commands: &[Command],
    config: &PickerConfig,
) -> SessionChange {
    match trigger::scan(value, config.trigger) {
        TriggerScan::Absent => {
            if slot.take().is_some() {
                SessionChange::Closed
            } else {
                SessionChange::Unchanged
            }
        }
        TriggerScan::Active { query } => {
            let was_open = slot.is_some();
            let mut session = slot.take().unwrap_or_else(DropdownSession::new);
            session.refresh(commands, &query);
            if session.is_empty() {
                if was_open {
                    SessionChange::Closed
                } else {
                    SessionChange::Unchanged
                }
            } else {
                *slot = Some(session);
                if was_open {
                    SessionChange::Refreshed
                } else {
                    SessionChange::Opened
                }
            }
        }
    }
}

/// Scroll offset of the surface the bound input sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollOffset {
    pub x: u16,
    pub y: u16,
}

/// Top-left corner of the overlay: above the input, offset by the fixed
/// overlay height plus gap. Saturates at the screen edge, so an input near
/// the top can still push the overlay out of its reserved space.
pub fn overlay_origin(input_bounds: Rect, scroll: ScrollOffset, config: &PickerConfig) -> (u16, u16) {
    let x = input_bounds.x.saturating_add(scroll.x);
    let y = input_bounds
        .y
        .saturating_add(scroll.y)
        .saturating_sub(config.overlay_height + config.overlay_gap);
    (x, y)
}

/// Concrete overlay rectangle, clipped to the screen.
pub fn overlay_rect(
    input_bounds: Rect,
    scroll: ScrollOffset,
    screen: Rect,
    config: &PickerConfig,
) -> Rect {
    let (x, y) = overlay_origin(input_bounds, scroll, config);
    Rect::new(x, y, config.overlay_width, config.overlay_height).intersection(screen)
}

#[cfg(test)]
#[path = "dropdown_tests.rs"]
mod dropdown_tests;
