//! Screen rendering against an in-memory terminal.

use pinpad_core::{
    Digit, FeedbackCommand, KeypadOrder, PaymentContext, PinEntryController, PinEvent,
    SessionConfig,
};
use pinpad_tui::{Screen, ui};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};
use tokio::time::Instant;

const WIDTH: u16 = 40;
const HEIGHT: u16 = 24;

fn controller() -> PinEntryController {
    let config = SessionConfig {
        payment: PaymentContext::new("12.50", "EUR"),
        ..SessionConfig::default()
    };
    PinEntryController::new(KeypadOrder::canonical(), config)
}

fn draw(screen: &Screen) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, screen)).unwrap();
    terminal.backend().buffer().clone()
}

fn rows(buffer: &Buffer) -> Vec<String> {
    (0..HEIGHT)
        .map(|y| (0..WIDTH).map(|x| buffer[(x, y)].symbol().to_string()).collect())
        .collect()
}

/// Column of the first dot symbol on the screen.
fn first_dot_column(buffer: &Buffer) -> Option<u16> {
    (0..HEIGHT).find_map(|y| {
        (0..WIDTH).find(|&x| matches!(buffer[(x, y)].symbol(), "●" | "○"))
    })
}

fn count(rows: &[String], symbol: &str) -> usize {
    rows.iter().map(|row| row.matches(symbol).count()).sum()
}

fn screen_for(controller: &PinEntryController) -> Screen {
    let mut screen = Screen::new(controller.keypad_order().clone());
    screen.update(&controller.snapshot());
    screen
}

#[test]
fn blank_before_first_snapshot() {
    let screen = Screen::new(KeypadOrder::canonical());
    let rows = rows(&draw(&screen));

    assert!(rows.iter().all(|row| row.trim().is_empty()));
}

#[test]
fn initial_screen_shows_payment_and_prompt() {
    let controller = controller();
    let rows = rows(&draw(&screen_for(&controller)));
    let text = rows.join("\n");

    assert!(text.contains("Payment 12.50 EUR"));
    assert!(text.contains("Enter PIN"));
    assert_eq!(count(&rows, "○"), controller.snapshot().total_dot_count);
    assert_eq!(count(&rows, "●"), 0);
}

#[test]
fn filled_dots_follow_entered_digits() {
    let mut controller = controller();
    for value in [4, 2] {
        controller.handle(PinEvent::Digit(Digit::new(value).unwrap()));
    }
    let rows = rows(&draw(&screen_for(&controller)));

    assert_eq!(count(&rows, "●"), 2);
    assert_eq!(count(&rows, "○"), controller.snapshot().total_dot_count - 2);
}

#[test]
fn confirm_dimmed_until_pin_complete() {
    let mut controller = controller();
    let ok_color = |buffer: &Buffer| {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH - 1).map(move |x| (x, y)))
            .find(|&(x, y)| buffer[(x, y)].symbol() == "O" && buffer[(x + 1, y)].symbol() == "K")
            .map(|pos| buffer[pos].fg)
    };

    assert_eq!(ok_color(&draw(&screen_for(&controller))), Some(Color::DarkGray));

    for value in [1, 2, 3, 4] {
        controller.handle(PinEvent::Digit(Digit::new(value).unwrap()));
    }
    assert_eq!(ok_color(&draw(&screen_for(&controller))), Some(Color::Green));
}

#[test]
fn shake_moves_dot_row() {
    let controller = controller();
    let mut screen = screen_for(&controller);
    let rest = first_dot_column(&draw(&screen)).unwrap();

    screen.apply(FeedbackCommand::Displace(10), Instant::now());
    assert_eq!(first_dot_column(&draw(&screen)), Some(rest + 2));

    screen.apply(FeedbackCommand::Displace(-10), Instant::now());
    assert_eq!(first_dot_column(&draw(&screen)), Some(rest - 2));

    screen.reset_feedback();
    assert_eq!(first_dot_column(&draw(&screen)), Some(rest));
}

#[test]
fn alert_turns_unfilled_dots_red() {
    let controller = controller();
    let mut screen = screen_for(&controller);
    screen.apply(FeedbackCommand::DotAlert(true), Instant::now());

    let buffer = draw(&screen);
    let column = first_dot_column(&buffer).unwrap();
    let row = (0..HEIGHT).find(|&y| buffer[(column, y)].symbol() == "○").unwrap();

    assert_eq!(buffer[(column, row)].fg, Color::Red);
}

#[test]
fn pulse_shows_indicator() {
    let controller = controller();
    let mut screen = screen_for(&controller);
    screen.apply(
        FeedbackCommand::Pulse { duration: std::time::Duration::from_millis(100) },
        Instant::now(),
    );

    assert!(rows(&draw(&screen)).join("\n").contains("~~~"));
}
