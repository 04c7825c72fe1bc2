use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::events::{Event, Events};
use crate::{time_format::TimeFormat, workout_tracker::WorkoutTracker, TimerDisplay};
use std::io::{stdout, Stdout};
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::Cell,
    widgets::Row,
    widgets::Table,
    widgets::TableState,
    widgets::{Block, Borders},
    Terminal,
};

pub struct App {
    tracker: Arc<Mutex<WorkoutTracker>>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: Events,
    // Set after 'r', the next digit resets that countdown.
    pending_reset: bool,
}

impl App {
    pub fn new(tracker: WorkoutTracker) -> Self {
        let mut stdout = stdout();
        enable_raw_mode().unwrap();
        execute!(stdout, EnterAlternateScreen).unwrap();

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.hide_cursor().unwrap();

        Self {
            tracker: Arc::new(Mutex::new(tracker)),
            terminal,
            events: Events::new(Duration::from_millis(250)),
            pending_reset: false,
        }
    }

    fn quit(&mut self) {
        disable_raw_mode().unwrap();
        execute!(stdout(), LeaveAlternateScreen).unwrap();
        self.terminal.show_cursor().unwrap();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.tracker.lock().unwrap().exit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.tracker.lock().unwrap().exit = true,
            KeyCode::Char('r') => self.pending_reset = true,
            KeyCode::Esc => self.pending_reset = false,
            KeyCode::Char('c') => self.tracker.lock().unwrap().complete(),
            KeyCode::Char('a') => self.tracker.lock().unwrap().abandon(),
            KeyCode::Char(digit @ '1'..='9') => {
                let position = digit as usize - '0' as usize;
                let mut tracker = self.tracker.lock().unwrap();
                if self.pending_reset {
                    self.pending_reset = false;
                    tracker.reset_rest_at(position);
                } else {
                    tracker.log_set(position);
                }
            }
            _ => {}
        }
    }
}

impl TimerDisplay for App {
    fn run(&mut self) -> Result<bool, Box<dyn Error>> {
        let mut rows: Vec<Vec<String>> = Vec::new();

        let tracker = self.tracker.lock().unwrap();
        if tracker.exit {
            drop(tracker);
            self.quit();
            return Ok(true);
        }

        let session = &tracker.session;
        let current = session.current_position();
        for (i, entry) in session.exercises.iter().enumerate() {
            let position = i + 1;
            let mut row = Vec::new();

            // Exercise
            if Some(position) == current {
                row.push(format!("> {} {}", position, entry.exercise.name));
            } else {
                row.push(format!("  {} {}", position, entry.exercise.name));
            }

            // Sets
            row.push(format!("{}/{}", entry.sets_logged(), entry.sets.len()));

            // Rest
            let rest = session
                .timer_key(position)
                .and_then(|key| tracker.timers.remaining(&key));
            if let Some(seconds) = rest {
                row.push(TimeFormat::for_rest().format_seconds(seconds));
            } else {
                row.push("".to_string());
            }

            rows.push(row);
        }

        let mut row = Vec::new();
        row.push("".to_string());
        row.push("Exercises done".to_string());
        row.push(format!(
            "{}/{}",
            session.exercises_done(),
            session.exercises.len()
        ));
        rows.push(row);

        if let Some(stamp) = &session.completed_at {
            let mut row = Vec::new();
            row.push("".to_string());
            row.push("Completed".to_string());
            row.push(stamp.clone());
            rows.push(row);
        }

        let mut title = format!(
            "{} - {}",
            session.workout_type.display_name(),
            session.location.display_name()
        );
        if self.pending_reset {
            title.push_str(" [reset: pick an exercise]");
        }

        drop(tracker);

        self.terminal.draw(|f| {
            let rects = Layout::default()
                .constraints([Constraint::Percentage(100)].as_ref())
                .margin(5)
                .split(f.size());

            let selected_style = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            let normal_style = Style::default().fg(Color::White);
            let header = Row::new(vec!["Exercise", "Sets", "Rest"]).style(normal_style);
            let rows = rows
                .iter()
                .map(|i| Row::new(i.iter().map(|cell| Cell::from(cell.as_str()))));
            let t = Table::new(rows)
                .header(header)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(selected_style)
                .highlight_symbol(">> ")
                .widths(&[
                    Constraint::Percentage(50),
                    Constraint::Percentage(20),
                    Constraint::Percentage(30),
                ]);
            f.render_stateful_widget(t, rects[0], &mut TableState::default());
        })?;

        if let Event::Input(key) = self.events.next()? {
            self.handle_key(key);
        }
        Ok(false)
    }

    fn tracker(&self) -> &Arc<Mutex<WorkoutTracker>> {
        &self.tracker
    }
}
