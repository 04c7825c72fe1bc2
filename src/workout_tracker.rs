use std::num::NonZeroU32;

use crate::config::Config;
use crate::file;
use crate::rest_timer::{TimerAction, TimerEffect, TimerKey, TimerState};
use crate::session::WorkoutSession;
use crate::tick::TickHandle;

// Work the event loop owes the outside world after a dispatch.
#[derive(Debug)]
pub enum AppEffect {
    StartTicker,
    StopTicker(TickHandle),
    Notify,
}

pub struct WorkoutTracker {
    pub session: WorkoutSession,
    pub timers: TimerState,
    pub config: Config,
    pub exit: bool,
    file: Option<String>,
    pending: Vec<AppEffect>,
}

impl WorkoutTracker {
    pub fn new(file: Option<String>, config: Config) -> Self {
        let session = match &file {
            Some(path) => file::session_or_default(path),
            None => WorkoutSession::default(),
        };

        Self {
            session,
            timers: TimerState::new(),
            config,
            exit: false,
            file,
            pending: Vec::new(),
        }
    }

    // Logs the next open set and restarts the rest countdown for that
    // exercise. A ticker start is requested only when no countdown was
    // running before; the caller completes it by dispatching a handle.
    pub fn log_set(&mut self, position: usize) -> bool {
        if self.session.completed {
            return false;
        }
        let key = match self.session.timer_key(position) {
            Some(key) => key,
            None => return false,
        };
        if self.session.log_next_set(position).is_none() {
            return false;
        }

        let seconds = self
            .config
            .rest_seconds(self.session.location, position == 1);
        let seconds = NonZeroU32::new(seconds).unwrap_or(NonZeroU32::MIN);

        let start_ticker = self.timers.is_empty();
        let effects = self.timers.reduce(TimerAction::Initialize { key, seconds });
        self.push_timer_effects(effects);
        if start_ticker {
            self.pending.push(AppEffect::StartTicker);
        }

        self.save();
        true
    }

    pub fn tick(&mut self) {
        let effects = self.timers.reduce(TimerAction::Decrement);
        self.push_timer_effects(effects);
    }

    pub fn set_ticker(&mut self, handle: TickHandle) {
        let effects = self.timers.reduce(TimerAction::SetTicker(handle));
        self.push_timer_effects(effects);
    }

    pub fn reset_rest(&mut self, key: TimerKey) {
        let effects = self.timers.reduce(TimerAction::Reset { key });
        self.push_timer_effects(effects);
    }

    pub fn reset_rest_at(&mut self, position: usize) -> bool {
        match self.session.timer_key(position) {
            Some(key) => {
                self.reset_rest(key);
                true
            }
            None => false,
        }
    }

    pub fn swap_exercise(&mut self, position: usize, name: String) -> bool {
        let old_key = match self.session.timer_key(position) {
            Some(key) => key,
            None => return false,
        };
        if !self.session.swap_exercise(position, name) {
            return false;
        }
        self.reset_rest(old_key);
        self.save();
        true
    }

    pub fn complete(&mut self) {
        if self.session.completed {
            return;
        }
        self.session.complete();
        self.clear_timers();
        self.save();
    }

    pub fn abandon(&mut self) {
        self.clear_timers();
        self.save();
        self.exit = true;
    }

    pub fn clear_timers(&mut self) {
        let effects = self.timers.reduce(TimerAction::Clear);
        self.push_timer_effects(effects);
    }

    pub fn take_pending(&mut self) -> Vec<AppEffect> {
        std::mem::take(&mut self.pending)
    }

    fn push_timer_effects(&mut self, effects: Vec<TimerEffect>) {
        for effect in effects {
            self.pending.push(match effect {
                TimerEffect::StopTicker(handle) => AppEffect::StopTicker(handle),
                TimerEffect::Notify => AppEffect::Notify,
            });
        }
    }

    fn save(&self) {
        if let Some(path) = &self.file {
            if let Err(err) = file::write_json(path, &self.session) {
                tracing::warn!("could not write session {}: {}", path, err);
            }
        }
    }
}
