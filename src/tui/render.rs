use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::color::emoji;
use crate::relay::Tag;
use crate::runner::Launch;

use super::ansi::styled_line;
use super::app::LauncherApp;

const TITLE: &str = "Activity Launcher";

/// Padding inside content area (1 cell on each side)
const CONTENT_PADDING: u16 = 1;

/// Style a log line gets from its tag.
pub(super) fn tag_style(tag: Tag) -> Style {
    match tag {
        Tag::Info => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Tag::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Tag::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tag::Plain => Style::default(),
    }
}

/// Draw the UI. Returns the inner height of the log pane.
pub(super) fn draw_ui<L: Launch>(f: &mut Frame, app: &LauncherApp<L>) -> usize {
    let size = f.area();

    f.render_widget(Clear, size);

    // header + table (rows, column header, borders) + log + buttons
    let table_height = app.registry.len() as u16 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(table_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(size);

    draw_header(f, chunks[0]);
    draw_table(f, chunks[1], app);
    let inner_height = draw_log(f, chunks[2], app);
    draw_buttons(f, chunks[3]);

    if app.show_warning {
        draw_warning_modal(f, size);
    }

    inner_height
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(header, area);
}

fn draw_table<L: Launch>(f: &mut Frame, area: Rect, app: &LauncherApp<L>) {
    let header = Row::new(vec![
        Cell::from("Activity Name"),
        Cell::from("Description"),
        Cell::from("Script Path"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.registry.iter().map(|activity| {
        Row::new(vec![
            Cell::from(activity.name.clone()),
            Cell::from(activity.description.clone()),
            Cell::from(activity.path.display().to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(25),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Activities [\u{2191}\u{2193} select] ")
            .title_style(Style::default().fg(Color::White)),
    )
    .row_highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default().with_selected(app.selected);
    f.render_stateful_widget(table, area, &mut state);
}

/// Draw the scrollable log pane. Returns inner height.
fn draw_log<L: Launch>(f: &mut Frame, area: Rect, app: &LauncherApp<L>) -> usize {
    let border_size: u16 = 2;
    let inner_width = area.width.saturating_sub(border_size + CONTENT_PADDING * 2) as usize;
    let inner_height = area
        .height
        .saturating_sub(border_size + CONTENT_PADDING * 2) as usize;

    let total_lines = app.log.len();
    let running = app.active_runs();
    let title = if running > 0 {
        format!(
            " Terminal ({} lines) [{} running] [PgUp/PgDn scroll] ",
            total_lines, running
        )
    } else {
        format!(" Terminal ({} lines) [PgUp/PgDn scroll] ", total_lines)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .title_style(Style::default().fg(Color::White));
    f.render_widget(block, area);

    if inner_height == 0 || inner_width == 0 {
        return 0;
    }

    let (start_idx, end_idx) = app.log.visible_range(inner_height);
    let visible_lines: Vec<Line> = app.log.lines()[start_idx..end_idx]
        .iter()
        .map(|entry| styled_line(&entry.text, tag_style(entry.tag), inner_width))
        .collect();

    let inner_area = area.inner(Margin {
        horizontal: CONTENT_PADDING + 1,
        vertical: CONTENT_PADDING + 1,
    });

    // No wrapping: long lines are cut at the pane width
    f.render_widget(Paragraph::new(visible_lines), inner_area);

    inner_height
}

fn draw_buttons(f: &mut Frame, area: Rect) {
    let button = Style::default()
        .fg(Color::Black)
        .bg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Cyan);

    let line = Line::from(vec![
        Span::styled(" Run Selected ", button),
        Span::styled(" Enter/r   ", key),
        Span::styled(" Clear Terminal ", button),
        Span::styled(" c   ", key),
        Span::styled(" Exit ", button),
        Span::styled(" q", key),
    ]);

    let bar = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(bar, area);
}

/// Draw the "nothing selected" warning modal.
fn draw_warning_modal(f: &mut Frame, area: Rect) {
    let modal_width = 44u16;
    let modal_height = 7u16;
    let x = (area.width.saturating_sub(modal_width)) / 2;
    let y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(
        x,
        y,
        modal_width.min(area.width),
        modal_height.min(area.height),
    );

    f.render_widget(Clear, modal_area);

    let modal_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Please select an activity to run!", emoji::WARNING),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(Color::Cyan))),
    ];

    let modal = Paragraph::new(modal_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Warning ")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        );

    f.render_widget(modal, modal_area);
}
