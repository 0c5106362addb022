use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ninemax::app::{App, Flow, Mode};
use ninemax::kv::MemoryKv;
use ninemax::runtime::{AppEvent, Runner, TestEventSource};
use ninemax::store::SessionStore;

// Headless integration using the internal runtime without a TTY: key
// events flow through Runner/TestEventSource into the app exactly as the
// binary's event loop would feed them.

fn send_chars(tx: &mpsc::Sender<AppEvent>, chars: &str) {
    for c in chars.chars() {
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

fn send_code(tx: &mpsc::Sender<AppEvent>, code: KeyCode) {
    tx.send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
        .unwrap();
}

fn drive(app: &mut App, rx: mpsc::Receiver<AppEvent>) {
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    // bounded loop; quits on 'q' or runs the queue dry
    for _ in 0..200u32 {
        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => break,
            AppEvent::Key(key) => {
                if let Flow::Quit = app.handle_key(key) {
                    break;
                }
            }
        }
    }
}

#[test]
fn headless_counting_flow() {
    let mut app = App::new(SessionStore::new(Box::new(MemoryKv::new())));
    let (tx, rx) = mpsc::channel();

    // twelve hands, then seat 3: vpip twice, pfr once, one check-raise
    send_chars(&tx, "hhhhhhhhhhhh");
    send_chars(&tx, "3vvpc");
    send_chars(&tx, "q");

    drive(&mut app, rx);

    assert_eq!(app.store.hand_count(), 12);
    let stat = app.store.seat(2).unwrap();
    assert_eq!(stat.vpip, 2);
    assert_eq!(stat.pfr, 1);
    assert_eq!(stat.check_raise, 1);
}

#[test]
fn headless_note_editing_flow() {
    let mut app = App::new(SessionStore::new(Box::new(MemoryKv::new())));
    let (tx, rx) = mpsc::channel();

    send_chars(&tx, "5m");
    send_chars(&tx, "check-raises dry boards");
    send_code(&tx, KeyCode::Enter);
    send_chars(&tx, "q");

    drive(&mut app, rx);

    assert_eq!(app.store.seat(4).unwrap().note, "check-raises dry boards");
    assert_eq!(app.mode, Mode::Table);
}

#[test]
fn headless_threshold_editing_flow() {
    let mut app = App::new(SessionStore::new(Box::new(MemoryKv::new())));
    let (tx, rx) = mpsc::channel();

    // open the editor, vpip +2, move down, tight diff -1, back out
    send_chars(&tx, "t++j-");
    send_code(&tx, KeyCode::Esc);
    send_chars(&tx, "q");

    drive(&mut app, rx);

    assert_eq!(app.store.config().vpip_threshold, 22);
    assert_eq!(app.store.config().tight_diff_threshold, 4);
}

#[test]
fn headless_reset_all_flow() {
    let mut app = App::new(SessionStore::new(Box::new(MemoryKv::new())));
    let (tx, rx) = mpsc::channel();

    send_chars(&tx, "hh1v");
    send_chars(&tx, "Ry");
    send_chars(&tx, "q");

    drive(&mut app, rx);

    assert_eq!(app.store.hand_count(), 0);
    assert!(app.store.seats().iter().all(|s| s.is_zero()));
}

#[test]
fn headless_flow_matches_direct_store_calls() {
    // the same mutations through keys and through the store agree
    let mut driven = App::new(SessionStore::new(Box::new(MemoryKv::new())));
    let (tx, rx) = mpsc::channel();
    send_chars(&tx, "hhh2vp");
    send_chars(&tx, "q");
    drive(&mut driven, rx);

    let mut direct = SessionStore::new(Box::new(MemoryKv::new()));
    for _ in 0..3 {
        direct.record_hand();
    }
    direct.bump(1, ninemax::session::SeatField::Vpip);
    direct.bump(1, ninemax::session::SeatField::Pfr);

    assert_eq!(driven.store.hand_count(), direct.hand_count());
    assert_eq!(driven.store.seats(), direct.seats());
    assert_eq!(driven.store.seat_rows(), direct.seat_rows());
}
