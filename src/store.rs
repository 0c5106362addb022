use chrono::Local;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::classify::{classify, display_percent, PlayerType};
use crate::config::{ClassifyConfig, ConfigPatch};
use crate::kv::KvStore;
use crate::session::{SeatField, SeatStat, Session, SEAT_COUNT};

// Storage keys, fixed since the first release.
pub const KEY_HANDS: &str = "pokerHands";
pub const KEY_SEATS: &str = "pokerPlayerStats";
pub const KEY_VPIP_THRESHOLD: &str = "vpipThreshold";
pub const KEY_TIGHT_DIFF: &str = "tightDiffThreshold";
pub const KEY_LOOSE_DIFF: &str = "looseDiffThreshold";
pub const KEY_MIN_HANDS: &str = "minHands";

/// Derived view model for one seat row, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    /// 0-based seat index; rendered 1-based.
    pub seat: usize,
    pub vpip: u32,
    pub pfr: u32,
    pub check_raise: u32,
    pub vpip_percent: u32,
    pub pfr_percent: u32,
    /// Displayed entry/aggression gap, floored at zero. The classifier
    /// works from the signed, unrounded value instead.
    pub gap: u32,
    pub note: String,
    pub player_type: PlayerType,
}

/// Single source of truth for the session and the classifier thresholds.
///
/// Constructed once at startup; loads each persisted key independently and
/// re-serializes full state after every mutation. Writes are
/// fire-and-forget: the local user is the only writer and each write
/// carries complete state, so a dropped write costs at most that write.
pub struct SessionStore {
    session: Session,
    config: ClassifyConfig,
    kv: Box<dyn KvStore>,
    log_path: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        let session = load_session(kv.as_ref());
        let config = load_config(kv.as_ref());
        Self {
            session,
            config,
            kv,
            log_path: None,
        }
    }

    /// Overrides the session-log location (tests; default is the project
    /// config dir).
    pub fn with_log_path(mut self, path: PathBuf) -> Self {
        self.log_path = Some(path);
        self
    }

    // --- mutations -------------------------------------------------------

    pub fn record_hand(&mut self) {
        self.session.record_hand();
        self.persist();
    }

    pub fn bump(&mut self, seat: usize, field: SeatField) {
        if self.session.bump(seat, field) {
            self.persist();
        }
    }

    pub fn reset_seat(&mut self, seat: usize) {
        self.session.reset_seat(seat);
        self.persist();
    }

    /// Ends the session: logs a summary row per active seat, then zeroes
    /// the hand count and every seat. Thresholds are untouched.
    pub fn reset_all(&mut self) {
        if self.session.hand_count > 0 {
            let _ = self.append_session_log();
        }
        self.session.reset_all();
        self.persist();
    }

    pub fn set_note(&mut self, seat: usize, note: impl Into<String>) {
        self.session.set_note(seat, note);
        self.persist();
    }

    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.apply(patch);
        self.persist();
    }

    pub fn restore_default_config(&mut self) {
        self.config = ClassifyConfig::default();
        self.persist();
    }

    // --- read model ------------------------------------------------------

    pub fn hand_count(&self) -> u32 {
        self.session.hand_count
    }

    pub fn seats(&self) -> &[SeatStat] {
        self.session.seats()
    }

    pub fn seat(&self, seat: usize) -> Option<&SeatStat> {
        self.session.seat(seat)
    }

    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }

    pub fn seat_rows(&self) -> Vec<SeatRow> {
        let hands = self.session.hand_count;
        self.session
            .seats()
            .iter()
            .enumerate()
            .map(|(idx, stat)| {
                let vpip_percent = display_percent(stat.vpip, hands);
                let pfr_percent = display_percent(stat.pfr, hands);
                SeatRow {
                    seat: idx,
                    vpip: stat.vpip,
                    pfr: stat.pfr,
                    check_raise: stat.check_raise,
                    vpip_percent,
                    pfr_percent,
                    gap: vpip_percent.saturating_sub(pfr_percent),
                    note: stat.note.clone(),
                    player_type: classify(stat, hands, &self.config),
                }
            })
            .collect()
    }

    // --- persistence -----------------------------------------------------

    fn persist(&mut self) {
        let seats_json = serde_json::to_string(self.session.seats()).unwrap_or_default();
        let _ = self.kv.put(KEY_HANDS, &self.session.hand_count.to_string());
        let _ = self.kv.put(KEY_SEATS, &seats_json);
        let _ = self
            .kv
            .put(KEY_VPIP_THRESHOLD, &self.config.vpip_threshold.to_string());
        let _ = self
            .kv
            .put(KEY_TIGHT_DIFF, &self.config.tight_diff_threshold.to_string());
        let _ = self
            .kv
            .put(KEY_LOOSE_DIFF, &self.config.loose_diff_threshold.to_string());
        let _ = self.kv.put(KEY_MIN_HANDS, &self.config.min_hands.to_string());
    }

    fn append_session_log(&self) -> io::Result<()> {
        let log_path = match &self.log_path {
            Some(p) => p.clone(),
            None => match default_log_path() {
                Some(p) => p,
                None => return Ok(()),
            },
        };

        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let needs_header = !log_path.exists();

        let mut log_file = OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(log_path)?;

        if needs_header {
            writeln!(log_file, "date,seat,hands,vpip,pfr,check_raise,type")?;
        }

        let date = Local::now().format("%c");
        for (idx, stat) in self.session.seats().iter().enumerate() {
            if !stat.has_action() {
                continue;
            }
            writeln!(
                log_file,
                "{},{},{},{},{},{},{}",
                date,
                idx + 1,
                self.session.hand_count,
                stat.vpip,
                stat.pfr,
                stat.check_raise,
                classify(stat, self.session.hand_count, &self.config),
            )?;
        }

        Ok(())
    }
}

fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ninemax").map(|pd| pd.config_dir().join("log.csv"))
}

fn load_session(kv: &dyn KvStore) -> Session {
    let hand_count = parse_key(kv, KEY_HANDS).unwrap_or(0);
    // A value holding anything but exactly nine records is as good as
    // missing; the nine-seat invariant wins over partial data.
    let seats: [SeatStat; SEAT_COUNT] = kv
        .get(KEY_SEATS)
        .and_then(|v| serde_json::from_str(&v).ok())
        .unwrap_or_default();
    Session::new(hand_count, seats)
}

fn load_config(kv: &dyn KvStore) -> ClassifyConfig {
    let defaults = ClassifyConfig::default();
    ClassifyConfig {
        vpip_threshold: parse_key(kv, KEY_VPIP_THRESHOLD).unwrap_or(defaults.vpip_threshold),
        tight_diff_threshold: parse_key(kv, KEY_TIGHT_DIFF)
            .unwrap_or(defaults.tight_diff_threshold),
        loose_diff_threshold: parse_key(kv, KEY_LOOSE_DIFF)
            .unwrap_or(defaults.loose_diff_threshold),
        min_hands: parse_key(kv, KEY_MIN_HANDS).unwrap_or(defaults.min_hands),
    }
}

/// One key, parsed independently; a missing or malformed value falls back
/// to the caller's default without touching any other key.
fn parse_key<T: std::str::FromStr>(kv: &dyn KvStore, key: &str) -> Option<T> {
    kv.get(key).and_then(|v| v.trim().parse().ok())
}
