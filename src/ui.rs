use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::app::{App, Mode, ThresholdField};
use crate::classify::PlayerType;

/// Archetype palette: green/blue/amber/red for TAG/LAG/TP/LP, gray while
/// the sample is too small.
pub fn type_color(player_type: PlayerType) -> Color {
    match player_type {
        PlayerType::Tag => Color::Green,
        PlayerType::Lag => Color::Blue,
        PlayerType::TightPassive => Color::Yellow,
        PlayerType::LoosePassive => Color::Red,
        PlayerType::Unknown => Color::DarkGray,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.mode {
            Mode::Thresholds => render_thresholds(self, area, buf),
            _ => render_table(self, area, buf),
        }
    }
}

fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let header = Paragraph::new(format!("{}H", app.store.hand_count()))
        .block(Block::default().borders(Borders::ALL).title("ninemax"))
        .style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let head = Row::new(vec!["Seat", "Type", "VPIP", "PFR", "CR", "Gap", "Note"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .store
        .seat_rows()
        .into_iter()
        .map(|row| {
            let type_style = Style::default()
                .fg(type_color(row.player_type))
                .add_modifier(Modifier::BOLD);

            let cells = vec![
                Cell::from(format!("P{}", row.seat + 1)),
                Cell::from(row.player_type.to_string()).style(type_style),
                Cell::from(format!("{}% ({})", row.vpip_percent, row.vpip)),
                Cell::from(format!("{}% ({})", row.pfr_percent, row.pfr)),
                Cell::from(row.check_raise.to_string()),
                Cell::from(row.gap.to_string()),
                Cell::from(row.note),
            ];

            let r = Row::new(cells);
            if row.seat == app.selected_seat {
                r.style(Style::default().bg(Color::DarkGray))
            } else {
                r
            }
        })
        .collect();

    let table = Table::new(
        rows,
        &[
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(10),
        ],
    )
    .header(head)
    .block(Block::default().borders(Borders::ALL).title("table"));
    Widget::render(table, chunks[1], buf);

    render_footer(app, chunks[2], buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    match app.mode {
        Mode::EditNote => {
            let line = Line::from(vec![
                Span::styled(
                    format!("P{} note: ", app.selected_seat + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(app.note_buffer.clone()),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ]);
            let editor = Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("note (enter save · esc cancel)"),
            );
            editor.render(area, buf);
        }
        Mode::ConfirmReset => {
            let prompt = Paragraph::new("reset hands and every seat? (y/n)")
                .block(Block::default().borders(Borders::ALL).title("reset all"))
                .style(
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);
            prompt.render(area, buf);
        }
        _ => {
            let help = Paragraph::new(
                "h/space hand+1 · v/p/c count · r reset seat · R reset all\n\
                 ↑/↓ or 1-9 seat · m note · x clear note · t thresholds · q quit",
            )
            .block(Block::default().borders(Borders::ALL))
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
            help.render(area, buf);
        }
    }
}

fn render_thresholds(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Classification thresholds")
        .block(Block::default().borders(Borders::ALL).title("config"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let config = app.store.config();
    let values = [
        config.vpip_threshold.to_string(),
        config.tight_diff_threshold.to_string(),
        config.loose_diff_threshold.to_string(),
        config.min_hands.to_string(),
    ];

    let rows: Vec<Row> = ThresholdField::ALL
        .iter()
        .zip(values)
        .map(|(field, value)| {
            let r = Row::new(vec![Cell::from(field.label()), Cell::from(value)]);
            if *field == app.threshold_field {
                r.style(Style::default().bg(Color::DarkGray))
            } else {
                r
            }
        })
        .collect();

    let table = Table::new(rows, &[Constraint::Length(26), Constraint::Length(8)]).block(
        Block::default()
            .borders(Borders::ALL)
            .title("defaults: 20 / 5 / 8 / 10"),
    );
    Widget::render(table, chunks[1], buf);

    let instructions = Paragraph::new("↑/↓ field · ←/→ adjust · d restore defaults · esc back")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);
    instructions.render(chunks[2], buf);
}
