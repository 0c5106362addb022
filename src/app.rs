use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::ConfigPatch;
use crate::session::{SeatField, SEAT_COUNT};
use crate::store::SessionStore;

/// Which view the app is showing and what keys mean there.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// The seat table; counting keys are live.
    Table,
    /// Line editor for the selected seat's note.
    EditNote,
    /// Threshold editor.
    Thresholds,
    /// Reset-all wipes the whole session, so it asks first.
    ConfirmReset,
}

/// Threshold fields addressable in the thresholds editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdField {
    Vpip,
    TightDiff,
    LooseDiff,
    MinHands,
}

impl ThresholdField {
    pub const ALL: [ThresholdField; 4] = [
        ThresholdField::Vpip,
        ThresholdField::TightDiff,
        ThresholdField::LooseDiff,
        ThresholdField::MinHands,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ThresholdField::Vpip => "vpip threshold %",
            ThresholdField::TightDiff => "tight diff threshold %",
            ThresholdField::LooseDiff => "loose diff threshold %",
            ThresholdField::MinHands => "min hands to classify",
        }
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Application state: the store plus everything that only exists while
/// the screen is up (mode, cursors, the in-flight note edit).
pub struct App {
    pub store: SessionStore,
    pub mode: Mode,
    pub selected_seat: usize,
    pub note_buffer: String,
    pub threshold_field: ThresholdField,
}

impl App {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            mode: Mode::Table,
            selected_seat: 0,
            note_buffer: String::new(),
            threshold_field: ThresholdField::Vpip,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        // ctrl+c quits from any mode
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.mode {
            Mode::Table => self.handle_table_key(key),
            Mode::EditNote => self.handle_note_key(key),
            Mode::Thresholds => self.handle_thresholds_key(key),
            Mode::ConfirmReset => self.handle_confirm_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_seat = self.selected_seat.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_seat = (self.selected_seat + 1).min(SEAT_COUNT - 1);
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.selected_seat = c as usize - '1' as usize;
            }
            KeyCode::Char('h') | KeyCode::Char(' ') => self.store.record_hand(),
            KeyCode::Char('v') => self.store.bump(self.selected_seat, SeatField::Vpip),
            KeyCode::Char('p') => self.store.bump(self.selected_seat, SeatField::Pfr),
            KeyCode::Char('c') => self.store.bump(self.selected_seat, SeatField::CheckRaise),
            KeyCode::Char('m') => {
                self.note_buffer = self
                    .store
                    .seat(self.selected_seat)
                    .map(|s| s.note.clone())
                    .unwrap_or_default();
                self.mode = Mode::EditNote;
            }
            KeyCode::Char('x') => self.store.set_note(self.selected_seat, ""),
            KeyCode::Char('r') => self.store.reset_seat(self.selected_seat),
            KeyCode::Char('R') => self.mode = Mode::ConfirmReset,
            KeyCode::Char('t') => self.mode = Mode::Thresholds,
            _ => {}
        }
        Flow::Continue
    }

    fn handle_note_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Enter => {
                let note = std::mem::take(&mut self.note_buffer);
                self.store.set_note(self.selected_seat, note);
                self.mode = Mode::Table;
            }
            KeyCode::Esc => {
                self.note_buffer.clear();
                self.mode = Mode::Table;
            }
            KeyCode::Backspace => {
                self.note_buffer.pop();
            }
            KeyCode::Char(c) => self.note_buffer.push(c),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_thresholds_key(&mut self, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('t') => self.mode = Mode::Table,
            KeyCode::Up | KeyCode::Char('k') => {
                self.threshold_field = self.threshold_field.prev();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.threshold_field = self.threshold_field.next();
            }
            KeyCode::Left | KeyCode::Char('-') => self.adjust_threshold(-1),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_threshold(1),
            KeyCode::Char('d') => self.store.restore_default_config(),
            _ => {}
        }
        Flow::Continue
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Flow {
        if let KeyCode::Char('y') | KeyCode::Enter = key.code {
            self.store.reset_all();
            self.selected_seat = 0;
        }
        self.mode = Mode::Table;
        Flow::Continue
    }

    fn adjust_threshold(&mut self, delta: i32) {
        let config = self.store.config();
        let patch = match self.threshold_field {
            ThresholdField::Vpip => ConfigPatch {
                vpip_threshold: Some(config.vpip_threshold.saturating_add(delta)),
                ..ConfigPatch::default()
            },
            ThresholdField::TightDiff => ConfigPatch {
                tight_diff_threshold: Some(config.tight_diff_threshold.saturating_add(delta)),
                ..ConfigPatch::default()
            },
            ThresholdField::LooseDiff => ConfigPatch {
                loose_diff_threshold: Some(config.loose_diff_threshold.saturating_add(delta)),
                ..ConfigPatch::default()
            },
            ThresholdField::MinHands => ConfigPatch {
                min_hands: Some(config.min_hands.saturating_add_signed(delta)),
                ..ConfigPatch::default()
            },
        };
        self.store.update_config(patch);
    }
}
