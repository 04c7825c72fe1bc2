use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::tick::TickHandle;

pub type TimerKey = String;

#[derive(Debug)]
pub enum TimerAction {
    Initialize { key: TimerKey, seconds: NonZeroU32 },
    Decrement,
    Reset { key: TimerKey },
    SetTicker(TickHandle),
    Clear,
}

#[derive(Debug)]
pub enum TimerEffect {
    StopTicker(TickHandle),
    Notify,
}

#[derive(Debug, Default)]
pub struct TimerState {
    timers: HashMap<TimerKey, u32>,
    ticker: Option<TickHandle>,
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timers(&self) -> &HashMap<TimerKey, u32> {
        &self.timers
    }

    pub fn remaining(&self, key: &str) -> Option<u32> {
        self.timers.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_some()
    }

    // Reducing never starts a ticker. The caller owns that side: effects only
    // hand back handles that are done ticking.
    pub fn reduce(&mut self, action: TimerAction) -> Vec<TimerEffect> {
        match action {
            TimerAction::Initialize { key, seconds } => {
                self.timers.insert(key, seconds.get());
                Vec::new()
            }
            TimerAction::Decrement => {
                let mut expired = false;
                self.timers.retain(|_, seconds| {
                    if *seconds == 1 {
                        expired = true;
                        false
                    } else {
                        *seconds -= 1;
                        true
                    }
                });

                let mut effects = Vec::new();
                if self.timers.is_empty() {
                    if let Some(handle) = self.ticker.take() {
                        effects.push(TimerEffect::StopTicker(handle));
                    }
                }
                // One notification per tick, no matter how many timers ran out.
                if expired {
                    effects.push(TimerEffect::Notify);
                }
                effects
            }
            TimerAction::Reset { key } => {
                self.timers.remove(&key);
                if self.timers.is_empty() {
                    if let Some(handle) = self.ticker.take() {
                        return vec![TimerEffect::StopTicker(handle)];
                    }
                }
                Vec::new()
            }
            TimerAction::SetTicker(handle) => match self.ticker.replace(handle) {
                Some(previous) => vec![TimerEffect::StopTicker(previous)],
                None => Vec::new(),
            },
            TimerAction::Clear => {
                self.timers.clear();
                match self.ticker.take() {
                    Some(handle) => vec![TimerEffect::StopTicker(handle)],
                    None => Vec::new(),
                }
            }
        }
    }
}
