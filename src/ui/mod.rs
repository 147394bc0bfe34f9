use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{AdminField, App, View, VoteState};
use crate::theme::Theme;

// Load theme colors from system (Omarchy/Hyprland) once at startup
static THEME: OnceLock<Theme> = OnceLock::new();

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::load)
}

fn accent() -> Color { theme().accent }
fn success() -> Color { theme().success }
fn danger() -> Color { theme().danger }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn inactive() -> Color { theme().inactive }
fn bar() -> Color { theme().bar }

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status line
            Constraint::Min(5),    // View content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_status_line(f, app, chunks[0]);

    match app.view {
        View::Vote => draw_vote_view(f, app, chunks[1]),
        View::Admin => draw_admin_view(f, app, chunks[1]),
        View::Results => draw_results_view(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: action feedback > per-view refresh info
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else {
        let info = match app.view {
            View::Vote => format!("Checking for polls every {}s", app.config.vote_refresh_secs),
            View::Results => format!("Updates every {}s", app.config.results_refresh_secs),
            View::Admin => "Admin Panel".to_string(),
        };
        Line::from(Span::styled(info, Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn view_block(title: &str, highlighted: bool) -> Block<'_> {
    let border_color = if highlighted { accent() } else { inactive() };
    let title_style = if highlighted {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };

    Block::default()
        .title(Span::styled(format!(" {} ", title), title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn draw_vote_view(f: &mut Frame, app: &App, area: Rect) {
    let block = view_block("Vote", true);

    let lines: Vec<Line> = match &app.vote {
        VoteState::Loading => vec![
            Line::from(""),
            Line::from(Span::styled("Loading...", Style::default().fg(text_dim()))),
        ],
        VoteState::NoPoll => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Questions will be live soon.",
                Style::default().fg(text()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Check back in a few moments for a new poll.",
                Style::default().fg(text_dim()),
            )),
        ],
        VoteState::Closed { .. } => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Voting Complete",
                Style::default().fg(text()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "The current poll has ended.",
                Style::default().fg(text_dim()),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(accent())),
                Span::styled(" View Results", Style::default().fg(text())),
            ]),
        ],
        VoteState::Active(card) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    card.poll.question.clone(),
                    Style::default().fg(text()).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];

            if card.poll.options.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No options available",
                    Style::default().fg(text_dim()),
                )));
            }

            for (i, opt) in card.poll.options.iter().enumerate() {
                let is_selected = card.selected == Some(i);
                let marker = if is_selected { "▸" } else { " " };
                let style = if is_selected {
                    Style::default().bg(bg_selected()).fg(text())
                } else if card.has_voted || card.submitting {
                    Style::default().fg(text_dim())
                } else {
                    Style::default().fg(text())
                };
                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", marker), style),
                    Span::styled(format!("{:2}  ", i + 1), style.fg(text_dim())),
                    Span::styled(opt.clone(), style),
                ]));
            }

            lines.push(Line::from(""));

            if let Some(ref error) = card.error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(danger()),
                )));
            }

            if card.submitting {
                lines.push(Line::from(Span::styled(
                    "Voting...",
                    Style::default().fg(warning()),
                )));
            } else if card.has_voted {
                lines.push(Line::from(Span::styled(
                    "Vote submitted",
                    Style::default().fg(success()),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::styled("↑↓", Style::default().fg(accent())),
                    Span::styled(" select  ", Style::default().fg(text_dim())),
                    Span::styled("Enter", Style::default().fg(accent())),
                    Span::styled(" vote", Style::default().fg(text_dim())),
                ]));
            }

            lines
        }
    };

    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(card, area);
}

fn draw_admin_view(f: &mut Frame, app: &App, area: Rect) {
    let admin = &app.admin;

    let active_height = if admin.active_poll.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(active_height), Constraint::Min(5)])
        .split(area);

    if let Some(ref active) = admin.active_poll {
        let block = Block::default()
            .title(Span::styled(
                " Active Poll ",
                Style::default().fg(success()).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(success()));

        let closing_hint = if admin.closing {
            Span::styled("Closing...", Style::default().fg(warning()))
        } else {
            Span::styled("Ctrl+K close  Ctrl+R live results", Style::default().fg(text_dim()))
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(active.question.clone(), Style::default().fg(text()).add_modifier(Modifier::BOLD)),
                Span::styled("  ACTIVE", Style::default().fg(success())),
            ]),
            Line::from(Span::styled(
                format!("Total votes: {}", active.total_votes),
                Style::default().fg(text_dim()),
            )),
            Line::from(closing_hint),
        ];

        f.render_widget(Paragraph::new(lines).block(block), chunks[0]);
    }

    let block = view_block("Create Poll", true);

    if let Some(ref confirmation) = admin.confirmation {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Poll Created",
                Style::default().fg(success()).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your poll is now live and ready for voting.",
                Style::default().fg(text()),
            )),
            Line::from(Span::styled(
                format!("Poll ID: {}", confirmation.poll_id),
                Style::default().fg(text_dim()),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(accent())),
                Span::styled(" create another", Style::default().fg(text_dim())),
            ]),
        ];
        f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
        return;
    }

    let mut lines = vec![field_line(
        "Question",
        &admin.question,
        admin.field == AdminField::Question,
    )];
    lines.push(Line::from(""));

    for (i, opt) in admin.options.iter().enumerate() {
        lines.push(field_line(
            &format!("Option {}", i + 1),
            opt,
            admin.field == AdminField::Option(i),
        ));
    }

    lines.push(Line::from(""));

    if let Some(ref error) = admin.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(danger()),
        )));
    }

    if admin.creating {
        lines.push(Line::from(Span::styled(
            "Creating...",
            Style::default().fg(warning()),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled("F2", Style::default().fg(accent())),
            Span::styled(" create poll", Style::default().fg(text_dim())),
        ]));
    }

    let form = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(form, chunks[1]);
}

fn field_line<'a>(label: &str, value: &str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(text_dim())
    };
    let value_style = if focused {
        Style::default().bg(bg_selected()).fg(text())
    } else {
        Style::default().fg(text())
    };
    let cursor = if focused { "█" } else { "" };

    Line::from(vec![
        Span::styled(format!("{:<12}", label), label_style),
        Span::styled(format!(" {}{}", value, cursor), value_style),
    ])
}

fn draw_results_view(f: &mut Frame, app: &App, area: Rect) {
    let state = &app.results;

    let banner_height = if state.new_poll_available { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(5)])
        .split(area);

    if state.new_poll_available {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(success()));
        let line = Line::from(vec![
            Span::styled("● ", Style::default().fg(success())),
            Span::styled("A new poll is live! Vote now.  ", Style::default().fg(text())),
            Span::styled("g", Style::default().fg(accent())),
            Span::styled(" go vote", Style::default().fg(text_dim())),
        ]);
        f.render_widget(Paragraph::new(line).block(block), chunks[0]);
    }

    let block = view_block("Results", true);

    if state.loading {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Loading...", Style::default().fg(text_dim()))),
        ];
        f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
        return;
    }

    let Some(results) = state.results.as_ref().filter(|_| state.error.is_none()) else {
        // Terminal error state with a single recovery action
        let message = state.error.clone().unwrap_or_else(|| "Unable to load results".to_string());
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(danger()))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(accent())),
                Span::styled(" return to vote", Style::default().fg(text_dim())),
            ]),
        ];
        f.render_widget(Paragraph::new(lines).block(block), chunks[1]);
        return;
    };

    let badge = if state.is_closed() {
        Span::styled(" CLOSED", Style::default().fg(danger()).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" LIVE", Style::default().fg(success()).add_modifier(Modifier::BOLD))
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                results.question.clone(),
                Style::default().fg(text()).add_modifier(Modifier::BOLD),
            ),
            badge,
        ]),
        Line::from(Span::styled(
            format!("Total votes: {}", results.total_votes),
            Style::default().fg(text_dim()),
        )),
        Line::from(""),
    ];

    // Bars use the server-supplied percentages directly
    let bar_area = area.width.saturating_sub(6).min(40);
    for (i, tally) in results.results.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:2}  ", i + 1), Style::default().fg(text_dim())),
            Span::styled(tally.option.clone(), Style::default().fg(text())),
            Span::styled(
                format!("  {} ({}%)", tally.votes, tally.percentage.round() as i64),
                Style::default().fg(text_dim()),
            ),
        ]));

        let filled = bar_width(tally.percentage, bar_area);
        lines.push(Line::from(vec![
            Span::styled("    ", Style::default()),
            Span::styled("█".repeat(filled as usize), Style::default().fg(bar())),
            Span::styled(
                "░".repeat((bar_area - filled) as usize),
                Style::default().fg(inactive()),
            ),
        ]));
    }

    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(card, chunks[1]);
}

/// Filled cells for a percentage bar of the given total width
fn bar_width(percentage: f64, width: u16) -> u16 {
    let clamped = percentage.clamp(0.0, 100.0);
    ((clamped / 100.0) * width as f64).round() as u16
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.view {
        View::Vote => match &app.vote {
            VoteState::Closed { .. } => vec![
                ("Enter", "Results"),
                ("a", "Admin"),
                ("q", "Quit"),
            ],
            _ => vec![
                ("↑↓", "Select"),
                ("Enter", "Vote"),
                ("a", "Admin"),
                ("q", "Quit"),
            ],
        },
        View::Admin => vec![
            ("Tab", "Field"),
            ("Ctrl+N", "Add opt"),
            ("Ctrl+D", "Del opt"),
            ("F2", "Create"),
            ("Ctrl+K", "Close poll"),
            ("Esc", "Back"),
        ],
        View::Results => vec![
            ("g", "Go vote"),
            ("r", "Refresh"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(inactive())));
        }
        spans.push(Span::styled(*key, Style::default().fg(accent())));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(text_dim())));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_width_follows_server_percentages() {
        assert_eq!(bar_width(60.0, 40), 24);
        assert_eq!(bar_width(40.0, 40), 16);
        assert_eq!(bar_width(0.0, 40), 0);
        assert_eq!(bar_width(100.0, 40), 40);
    }

    #[test]
    fn bar_width_clamps_out_of_range_values() {
        assert_eq!(bar_width(150.0, 20), 20);
        assert_eq!(bar_width(-5.0, 20), 0);
    }
}
