//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::api::Workout;
use crate::session::{SessionController, SessionSnapshot, SessionStatus};
use crate::tui::app::{ActiveWorkout, App, Load, Screen};
use crate::tui::event::help_text;

const ACCENT: Color = Color::LightRed;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    match app.screen {
        Screen::Workouts => render_workouts(frame, app),
        Screen::Session => render_session(frame, app),
    }
}

/// Render the workout list screen.
fn render_workouts(frame: &mut Frame<'_>, app: &App<'_>) {
    // Create layout: header, list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // List
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let count = match &app.workouts {
        Load::Ready(workouts) => format!(" ({} workouts)", workouts.len()),
        Load::Loading | Load::Failed(_) => String::new(),
    };
    render_header(frame, chunks[0], &format!(" Workout List{count} "));

    match &app.workouts {
        Load::Loading => render_message(frame, chunks[1], "Loading workouts...", Color::Gray),
        Load::Failed(message) => render_failure(frame, chunks[1], message),
        Load::Ready(workouts) if workouts.is_empty() => render_message(
            frame,
            chunks[1],
            "No Workouts Found\n\nCheck back later for new workouts!",
            Color::Gray,
        ),
        Load::Ready(workouts) => render_workout_list(frame, chunks[1], workouts, app.selected),
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_workout_list(frame: &mut Frame<'_>, area: Rect, workouts: &[Workout], selected: usize) {
    let items: Vec<ListItem<'_>> = workouts
        .iter()
        .enumerate()
        .map(|(i, workout)| {
            let is_selected = i == selected;

            let mut title = vec![Span::styled(
                &workout.name,
                Style::default().add_modifier(Modifier::BOLD).fg(if is_selected {
                    ACCENT
                } else {
                    Color::White
                }),
            )];
            if let Some(duration) = workout.duration {
                title.push(Span::styled(
                    format!("  {duration} min"),
                    Style::default().fg(Color::Yellow),
                ));
            }

            let mut lines = vec![Line::from(title)];
            if !workout.description.is_empty() {
                lines.push(Line::styled(
                    format!("  {}", workout.description),
                    Style::default().fg(Color::Gray),
                ));
            }
            let rest = workout
                .rest
                .map_or_else(String::new, |r| format!("Rest: {r}s   "));
            lines.push(Line::styled(
                format!("  {rest}Start Workout →"),
                Style::default().fg(Color::DarkGray),
            ));

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(lines).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the session screen for the active workout.
fn render_session(frame: &mut Frame<'_>, app: &App<'_>) {
    let Some(active) = app.active.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with clock
            Constraint::Length(1), // Progress
            Constraint::Min(0),    // Exercises
            Constraint::Length(3), // Controls
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match &active.runner {
        Load::Loading => {
            render_header(frame, chunks[0], &format!(" {} ", active.title()));
            render_message(frame, chunks[2], "Loading workout...", Color::Gray);
        }
        Load::Failed(message) => {
            render_header(frame, chunks[0], &format!(" {} ", active.title()));
            render_failure(frame, chunks[2], message);
        }
        Load::Ready(runner) => {
            let session = runner.controller();
            let snapshot = session.snapshot();

            render_header(
                frame,
                chunks[0],
                &format!(" {}   ⏱ {} ", active.title(), snapshot.formatted_time),
            );
            render_progress(frame, chunks[1], &snapshot);

            if snapshot.status == SessionStatus::Idle {
                render_message(frame, chunks[2], "This workout has no exercises.", Color::Gray);
            } else {
                render_exercises(frame, chunks[2], session, active);
            }

            if snapshot.status == SessionStatus::Running {
                render_controls(frame, chunks[3], &snapshot);
            }
            if snapshot.status == SessionStatus::Finished {
                render_finished(frame, &snapshot);
            }
        }
    }

    render_status_bar(frame, app, chunks[4]);
}

fn render_progress(frame: &mut Frame<'_>, area: Rect, snapshot: &SessionSnapshot) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
        .label(format!(
            "{}/{}",
            if snapshot.total_exercises == 0 {
                0
            } else {
                snapshot.current_index + 1
            },
            snapshot.total_exercises
        ))
        .ratio(snapshot.progress_fraction.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_exercises(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &SessionController,
    active: &ActiveWorkout,
) {
    let current = session.current_index();
    let cursor = active.cursor();

    let items: Vec<ListItem<'_>> = session
        .exercises()
        .iter()
        .enumerate()
        .map(|(i, exercise)| {
            let (marker, marker_color, name_style) = if i == current {
                ("●", ACCENT, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            } else if i < current {
                ("●", Color::Red, Style::default().fg(Color::Gray))
            } else {
                ("○", Color::DarkGray, Style::default().fg(Color::DarkGray))
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(marker_color)),
                Span::styled(format!("{}. {}", i + 1, exercise.name), name_style),
            ])];

            if !exercise.description.is_empty() {
                lines.push(Line::styled(
                    format!("    {}", exercise.description),
                    Style::default().fg(Color::Gray),
                ));
            }

            let prescription = exercise.prescription();
            if !prescription.is_empty() {
                lines.push(Line::styled(
                    format!("    {prescription}"),
                    Style::default().fg(Color::Cyan),
                ));
            }

            let style = if i == cursor {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(lines).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    // Selecting the cursor row keeps it scrolled into view
    let mut state = ListState::default();
    state.select(Some(cursor));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_controls(frame: &mut Frame<'_>, area: Rect, snapshot: &SessionSnapshot) {
    let at_start = snapshot.current_index == 0;
    let previous_style = if at_start {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    let next_label = if snapshot.is_last_exercise {
        "Finish [n] "
    } else {
        "Next [n] "
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let previous = Paragraph::new(" [p] Previous")
        .style(previous_style)
        .block(Block::default().borders(Borders::TOP));
    let next = Paragraph::new(next_label)
        .alignment(Alignment::Right)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(previous, halves[0]);
    frame.render_widget(next, halves[1]);
}

/// Render the completion summary over the session screen.
fn render_finished(frame: &mut Frame<'_>, snapshot: &SessionSnapshot) {
    let area = centered_rect(50, 50, frame.area());

    let lines = vec![
        Line::from(Span::styled(
            "✓ Workout Complete!",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total Time           ", Style::default().fg(Color::Gray)),
            Span::styled(
                snapshot.formatted_time.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Exercises Completed  ", Style::default().fg(Color::Gray)),
            Span::styled(
                snapshot.exercises_completed.to_string(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[b] Return to Workouts    [s] Start Over",
            Style::default().fg(Color::White),
        )),
    ];

    let summary = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(summary, area);
}

/// Render a header bar.
fn render_header(frame: &mut Frame<'_>, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );

    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame<'_>, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_failure(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Oops! Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled("Press r to try again", Style::default().fg(ACCENT))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or_else(|| help_text(app));

    let status = Paragraph::new(status_text.to_string()).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// A rectangle of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::api::client::MockWorkoutSource;
    use crate::api::ExerciseDescriptor;
    use crate::session::SessionEvent;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session_source() -> MockWorkoutSource {
        let mut source = MockWorkoutSource::new();
        source.expect_load_exercises().returning(|_| {
            let mut squat = ExerciseDescriptor::new("Squat", "Back squat");
            squat.sets = Some(5);
            squat.reps = Some(5);
            Ok(vec![squat, ExerciseDescriptor::new("Plank", "Hold it")])
        });
        source
    }

    #[test]
    fn test_render_workout_list() {
        let mut source = MockWorkoutSource::new();
        source.expect_load_workouts().returning(|| {
            Ok(vec![Workout {
                id: "1".to_string(),
                name: "Upper Body".to_string(),
                duration: Some(45.0),
                description: "Push and pull".to_string(),
                rest: Some(60.0),
            }])
        });
        let mut app = App::new(&source, Duration::from_secs(1));
        app.load_pending().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Workout List (1 workouts)"));
        assert!(text.contains("Upper Body"));
        assert!(text.contains("45 min"));
        assert!(text.contains("Rest: 60s"));
    }

    #[test]
    fn test_render_session() {
        let source = session_source();
        let mut app = App::with_workout(&source, Duration::from_secs(60), "3".to_string());
        app.load_pending().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Workout 3"));
        assert!(text.contains("00:00"));
        assert!(text.contains("1. Squat"));
        assert!(text.contains("5 x 5"));
        assert!(text.contains("Next [n]"));
    }

    #[test]
    fn test_render_finished_summary() {
        let source = session_source();
        let mut app = App::with_workout(&source, Duration::from_secs(60), "3".to_string());
        app.load_pending().unwrap();
        app.send(SessionEvent::Next);
        app.send(SessionEvent::Next);
        app.pump().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Workout Complete!"));
        assert!(text.contains("Exercises Completed"));
        assert!(text.contains("Start Over"));
    }

    #[test]
    fn test_render_failed_load() {
        let mut source = MockWorkoutSource::new();
        source
            .expect_load_workouts()
            .returning(|| Err(crate::error::WorkoutError::fetch("Failed to fetch workouts")));
        let mut app = App::new(&source, Duration::from_secs(1));
        app.load_pending().unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Oops! Something went wrong"));
        assert!(text.contains("Failed to fetch workouts"));
    }
}
