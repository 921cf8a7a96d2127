//! UI rendering for the terminal menu.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::focus::render_progress_bar;
use crate::menu::app::App;
use crate::system::{CommandRunner, FocusBackend};

/// Render the application UI.
pub fn render<B, R>(frame: &mut Frame<'_>, app: &App<B, R>)
where
    B: FocusBackend,
    R: CommandRunner,
{
    // Create layout: header, menu, time left / prompt, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Menu
            Constraint::Length(3), // Time left or prompt
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_menu(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header<B, R>(frame: &mut Frame<'_>, app: &App<B, R>, area: Rect)
where
    B: FocusBackend,
    R: CommandRunner,
{
    let cycle = app
        .controller
        .plan()
        .filter(|_| app.controller.is_running())
        .map_or_else(String::new, |plan| {
            format!("({} of {} left) ", plan.sessions_remaining, plan.total_sessions)
        });
    let title = format!(" Alfred - {} {cycle}", app.phase());

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_menu<B, R>(frame: &mut Frame<'_>, app: &App<B, R>, area: Rect)
where
    B: FocusBackend,
    R: CommandRunner,
{
    let items: Vec<ListItem<'_>> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, &item)| {
            let enabled = app.is_enabled(item);
            let mut style = if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if i == app.selected {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                if !enabled {
                    style = style.fg(Color::Gray);
                }
            }

            ListItem::new(Line::from(Span::styled(item.title(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Focus ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer<B, R>(frame: &mut Frame<'_>, app: &App<B, R>, area: Rect)
where
    B: FocusBackend,
    R: CommandRunner,
{
    let text = if let Some(input) = &app.input {
        Line::from(vec![
            Span::styled(format!("{}: ", input.question()), Style::default().fg(Color::Yellow)),
            Span::raw(input.buffer.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if let Some(title) = app.menu().time_left_title() {
        let progress = app
            .controller
            .sessions()
            .session()
            .map_or(0.0, |s| s.progress());
        Line::from(vec![
            Span::styled(title, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(render_progress_bar(progress, 20), Style::default().fg(Color::Green)),
        ])
    } else {
        Line::from(Span::styled("No focus session", Style::default().fg(Color::DarkGray)))
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_status_bar<B, R>(frame: &mut Frame<'_>, app: &App<B, R>, area: Rect)
where
    B: FocusBackend,
    R: CommandRunner,
{
    let status_text = app
        .status
        .as_deref()
        .or(app.menu().message.as_deref())
        .unwrap_or("j/k:nav | Enter:select | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
