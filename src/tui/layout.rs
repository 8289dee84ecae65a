use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::wizard::{Step, WizardState};

pub fn render(frame: &mut Frame, state: &WizardState, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Step body
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    match state.step() {
        Step::ModeSelect | Step::PrinterSelect => render_list(frame, state, chunks[0], colors),
        Step::SpaceInput | Step::PostInput => render_input(frame, state, chunks[0], colors),
        Step::Running | Step::Done | Step::Error => render_run(frame, state, chunks[0], colors),
    }
    render_hints(frame, state, chunks[1], colors);
}

fn render_list(frame: &mut Frame, state: &WizardState, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = state
        .list_rows()
        .into_iter()
        .map(|(title, description)| {
            let mut lines = vec![Line::from(title)];
            if !description.is_empty() {
                lines.push(Line::styled(
                    format!("  {}", description),
                    Style::default().fg(colors.description),
                ));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let mut title = format!(" {} ", state.list_title());
    if state.step() == Step::PrinterSelect && state.printers_loading() {
        title.push_str("(looking for printers...) ");
    }

    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(colors.title)))
        .borders(Borders::ALL);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.cursor()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_input(frame: &mut Frame, state: &WizardState, area: Rect, colors: &ColorConfig) {
    let field = if state.input().is_empty() {
        Span::styled(state.input_placeholder(), Style::default().fg(colors.hint))
    } else {
        Span::raw(state.input())
    };

    let mut lines = vec![
        Line::from(vec![Span::raw(state.input_prompt()), field]),
        Line::from(""),
    ];
    if let Some(error) = state.input_error() {
        lines.push(Line::styled(error, Style::default().fg(colors.error)));
    }

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", state.input_label()),
            Style::default().fg(colors.title),
        ))
        .borders(Borders::ALL);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_run(frame: &mut Frame, state: &WizardState, area: Rect, colors: &ColorConfig) {
    let error = match state.step() {
        Step::Error => state.error(),
        _ => None,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                  // Status
            Constraint::Min(3),                                     // Log
            Constraint::Length(if error.is_some() { 3 } else { 0 }), // Error
        ])
        .split(area);

    let status = match state.step() {
        Step::Running => Line::styled(
            format!("{} {}", state.spinner_frame(), state.status()),
            Style::default().fg(colors.status),
        ),
        Step::Error => Line::styled(
            state.status().to_string(),
            Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
        ),
        _ => Line::styled(
            state.status().to_string(),
            Style::default().fg(colors.status).add_modifier(Modifier::BOLD),
        ),
    };
    let status = Paragraph::new(status)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[0]);

    let log_lines: Vec<Line> = state
        .recent_logs()
        .iter()
        .map(|line| Line::styled(line.as_str(), Style::default().fg(colors.log)))
        .collect();
    let log = Paragraph::new(log_lines).block(
        Block::default()
            .title(Span::styled(" Log ", Style::default().fg(colors.title)))
            .borders(Borders::ALL),
    );
    frame.render_widget(log, chunks[1]);

    if let Some(error) = error {
        let error = Paragraph::new(Line::styled(
            format!("error: {}", error),
            Style::default().fg(colors.error),
        ))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        frame.render_widget(error, chunks[2]);
    }
}

fn render_hints(frame: &mut Frame, state: &WizardState, area: Rect, colors: &ColorConfig) {
    let hints = match state.step() {
        Step::ModeSelect | Step::PrinterSelect => "↑/↓ move • enter select • q quit",
        Step::SpaceInput | Step::PostInput => "enter continue • esc quit",
        Step::Running | Step::Done | Step::Error => "q quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(colors.hint))),
        area,
    );
}
