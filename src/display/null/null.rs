use crate::{workout_tracker::WorkoutTracker, TimerDisplay};

use std::{
    error::Error,
    sync::{Arc, Mutex},
};
pub struct App {
    tracker: Arc<Mutex<WorkoutTracker>>,
}
impl App {
    pub fn new(tracker: WorkoutTracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }
}

impl TimerDisplay for App {
    fn run(&mut self) -> Result<bool, Box<dyn Error>> {
        let tracker = self.tracker.lock().unwrap();
        if tracker.exit {
            return Ok(true);
        }
        Ok(false)
    }

    fn tracker(&self) -> &Arc<Mutex<WorkoutTracker>> {
        &self.tracker
    }
}
