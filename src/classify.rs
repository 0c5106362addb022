use crate::config::ClassifyConfig;
use crate::session::SeatStat;

/// Coarse behavioral archetype for one seat.
///
/// `Unknown` means the sample is too small to say anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PlayerType {
    #[strum(serialize = "TAG")]
    Tag,
    #[strum(serialize = "LAG")]
    Lag,
    #[strum(serialize = "TP")]
    TightPassive,
    #[strum(serialize = "LP")]
    LoosePassive,
    #[strum(serialize = "Unknown")]
    Unknown,
}

/// Two-axis read of a seat: entry volume (tight vs. loose) split at the
/// vpip threshold, then the vpip-pfr gap (aggressive vs. passive) split at
/// the per-regime diff threshold.
///
/// Comparisons run on unrounded percentages. A zero hand count always
/// yields `Unknown`, whatever `min_hands` is configured to; counters larger
/// than the hand count and a pfr above vpip are accepted as-is.
pub fn classify(seat: &SeatStat, hand_count: u32, config: &ClassifyConfig) -> PlayerType {
    if hand_count == 0 || hand_count < config.min_hands {
        return PlayerType::Unknown;
    }

    let hands = f64::from(hand_count);
    let vpip_pct = f64::from(seat.vpip) / hands * 100.0;
    let pfr_pct = f64::from(seat.pfr) / hands * 100.0;
    let diff = vpip_pct - pfr_pct;

    if vpip_pct <= f64::from(config.vpip_threshold) {
        if diff <= f64::from(config.tight_diff_threshold) {
            PlayerType::Tag
        } else {
            PlayerType::TightPassive
        }
    } else if diff <= f64::from(config.loose_diff_threshold) {
        PlayerType::Lag
    } else {
        PlayerType::LoosePassive
    }
}

/// Rounded percentage for display only; 0 whenever no hands are recorded.
/// Never feeds back into `classify`, which compares unrounded values.
pub fn display_percent(count: u32, hand_count: u32) -> u32 {
    if hand_count == 0 {
        return 0;
    }
    (f64::from(count) / f64::from(hand_count) * 100.0).round() as u32
}
