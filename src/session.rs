use serde::{Deserialize, Serialize};

/// A 9-max table has exactly nine seats; identity is the positional index.
pub const SEAT_COUNT: usize = 9;

/// Running counters and the free-text read for one seat.
///
/// Wire names (`checkRaise`, `memo`) are the shape stored under the
/// `pokerPlayerStats` key and must stay stable across releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStat {
    pub vpip: u32,
    pub pfr: u32,
    #[serde(rename = "checkRaise")]
    pub check_raise: u32,
    #[serde(rename = "memo")]
    pub note: String,
}

impl SeatStat {
    pub fn is_zero(&self) -> bool {
        self.vpip == 0 && self.pfr == 0 && self.check_raise == 0 && self.note.is_empty()
    }

    /// Whether the seat has any counted action (notes alone don't count).
    pub fn has_action(&self) -> bool {
        self.vpip > 0 || self.pfr > 0 || self.check_raise > 0
    }
}

/// Which per-seat counter a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatField {
    Vpip,
    Pfr,
    CheckRaise,
}

/// One live session: the global hand count plus nine seat records.
///
/// All mutations are total; an out-of-range seat index is rejected as a
/// no-op rather than touching a neighboring seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub hand_count: u32,
    seats: [SeatStat; SEAT_COUNT],
}

impl Session {
    pub fn new(hand_count: u32, seats: [SeatStat; SEAT_COUNT]) -> Self {
        Self { hand_count, seats }
    }

    pub fn record_hand(&mut self) {
        self.hand_count = self.hand_count.saturating_add(1);
    }

    /// Increments exactly the named counter on that seat.
    /// Returns false (and changes nothing) for an out-of-range index.
    pub fn bump(&mut self, seat: usize, field: SeatField) -> bool {
        let Some(stat) = self.seats.get_mut(seat) else {
            return false;
        };
        let counter = match field {
            SeatField::Vpip => &mut stat.vpip,
            SeatField::Pfr => &mut stat.pfr,
            SeatField::CheckRaise => &mut stat.check_raise,
        };
        *counter = counter.saturating_add(1);
        true
    }

    /// Zeroes one seat's counters and clears its note; the hand count and
    /// every other seat are untouched.
    pub fn reset_seat(&mut self, seat: usize) {
        if let Some(stat) = self.seats.get_mut(seat) {
            *stat = SeatStat::default();
        }
    }

    pub fn reset_all(&mut self) {
        *self = Session::default();
    }

    /// Replaces the note verbatim; any string, including empty, is accepted.
    pub fn set_note(&mut self, seat: usize, note: impl Into<String>) {
        if let Some(stat) = self.seats.get_mut(seat) {
            stat.note = note.into();
        }
    }

    pub fn seat(&self, seat: usize) -> Option<&SeatStat> {
        self.seats.get(seat)
    }

    pub fn seats(&self) -> &[SeatStat] {
        &self.seats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_zeroed() {
        let session = Session::default();

        assert_eq!(session.hand_count, 0);
        assert_eq!(session.seats().len(), SEAT_COUNT);
        assert!(session.seats().iter().all(|s| s.is_zero()));
    }

    #[test]
    fn record_hand_increments() {
        let mut session = Session::default();

        session.record_hand();
        session.record_hand();

        assert_eq!(session.hand_count, 2);
    }

    #[test]
    fn bump_touches_only_the_named_counter() {
        let mut session = Session::default();
        session.set_note(3, "limps a lot");

        assert!(session.bump(3, SeatField::Vpip));

        let stat = session.seat(3).unwrap();
        assert_eq!(stat.vpip, 1);
        assert_eq!(stat.pfr, 0);
        assert_eq!(stat.check_raise, 0);
        assert_eq!(stat.note, "limps a lot");
    }

    #[test]
    fn bump_leaves_other_seats_alone() {
        let mut session = Session::default();

        session.bump(0, SeatField::Pfr);

        for (idx, stat) in session.seats().iter().enumerate() {
            if idx == 0 {
                assert_eq!(stat.pfr, 1);
            } else {
                assert!(stat.is_zero());
            }
        }
    }

    #[test]
    fn bump_each_field() {
        let mut session = Session::default();

        session.bump(5, SeatField::Vpip);
        session.bump(5, SeatField::Pfr);
        session.bump(5, SeatField::CheckRaise);
        session.bump(5, SeatField::CheckRaise);

        let stat = session.seat(5).unwrap();
        assert_eq!(stat.vpip, 1);
        assert_eq!(stat.pfr, 1);
        assert_eq!(stat.check_raise, 2);
    }

    #[test]
    fn bump_out_of_range_is_rejected() {
        let mut session = Session::default();

        assert!(!session.bump(SEAT_COUNT, SeatField::Vpip));
        assert!(!session.bump(usize::MAX, SeatField::CheckRaise));
        assert_eq!(session, Session::default());
    }

    #[test]
    fn reset_seat_zeroes_one_seat_only() {
        let mut session = Session::default();
        session.record_hand();
        session.bump(2, SeatField::Vpip);
        session.bump(2, SeatField::Pfr);
        session.set_note(2, "aggro");
        session.bump(7, SeatField::Vpip);

        session.reset_seat(2);

        assert!(session.seat(2).unwrap().is_zero());
        assert_eq!(session.seat(7).unwrap().vpip, 1);
        assert_eq!(session.hand_count, 1);
    }

    #[test]
    fn reset_seat_out_of_range_is_noop() {
        let mut session = Session::default();
        session.bump(8, SeatField::Vpip);

        session.reset_seat(SEAT_COUNT);

        assert_eq!(session.seat(8).unwrap().vpip, 1);
    }

    #[test]
    fn reset_all_zeroes_everything() {
        let mut session = Session::default();
        for _ in 0..12 {
            session.record_hand();
        }
        session.bump(0, SeatField::Vpip);
        session.set_note(4, "tight");

        session.reset_all();

        assert_eq!(session, Session::default());
    }

    #[test]
    fn set_note_accepts_any_string() {
        let mut session = Session::default();

        session.set_note(1, "3-bets light, folds to pressure");
        assert_eq!(session.seat(1).unwrap().note, "3-bets light, folds to pressure");

        session.set_note(1, "");
        assert_eq!(session.seat(1).unwrap().note, "");
    }

    #[test]
    fn seat_stats_serialize_with_wire_names() {
        let stat = SeatStat {
            vpip: 3,
            pfr: 1,
            check_raise: 2,
            note: "trappy".to_string(),
        };

        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(
            json,
            r#"{"vpip":3,"pfr":1,"checkRaise":2,"memo":"trappy"}"#
        );

        let back: SeatStat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stat);
    }

    #[test]
    fn has_action_ignores_notes() {
        let mut stat = SeatStat::default();
        assert!(!stat.has_action());

        stat.note = "no showdowns yet".to_string();
        assert!(!stat.has_action());

        stat.check_raise = 1;
        assert!(stat.has_action());
    }
}
