//! Rendering for the drift TUI - volume bar, sound list, key hints

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use drift_audio::{engine::ChannelPhase, io::ContextState};

use super::app::Drift;

pub fn render(frame: &mut Frame, app: &Drift) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_volume(frame, chunks[0], app);
    render_sounds(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);
}

fn render_volume(frame: &mut Frame, area: Rect, app: &Drift) {
    let engine = app.engine();
    let context = match engine.context_state() {
        ContextState::Uninitialized => "idle",
        ContextState::Running => "running",
        ContextState::Suspended => "suspended",
        ContextState::Offline => "offline",
    };
    let label = format!(
        "volume {:3.0}%  |  {} active  |  output {}",
        engine.volume() * 100.0,
        engine.active_len(),
        context
    );

    let gauge = Gauge::default()
        .block(Block::default().title(" drift ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(engine.volume() as f64)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_sounds(frame: &mut Frame, area: Rect, app: &Drift) {
    let items: Vec<ListItem> = app
        .sounds()
        .iter()
        .enumerate()
        .map(|(i, sound)| {
            let (marker, style) = match app.engine().phase(sound.id) {
                None => ("  ", Style::default().fg(Color::DarkGray)),
                Some(ChannelPhase::Starting) => ("^ ", Style::default().fg(Color::Yellow)),
                Some(ChannelPhase::Playing) => ("* ", Style::default().fg(Color::Green)),
                Some(ChannelPhase::Stopping) => ("v ", Style::default().fg(Color::Red)),
                Some(ChannelPhase::External) => ("o ", Style::default().fg(Color::Magenta)),
            };

            let mut line = vec![
                Span::styled(marker, style),
                Span::raw(format!("{:<16}", sound.label)),
                Span::styled(
                    format!("{}", sound.kind),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if i == app.selected() {
                line.insert(0, Span::styled("> ", Style::default().add_modifier(Modifier::BOLD)));
            } else {
                line.insert(0, Span::raw("  "));
            }
            ListItem::new(Line::from(line))
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" sounds ").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &Drift) {
    let text = match app.status() {
        Some(status) => Line::from(Span::styled(status, Style::default().fg(Color::Red))),
        None => Line::from(
            "up/down select | enter toggle | +/- volume | s stop all | p suspend | q quit",
        ),
    };
    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
