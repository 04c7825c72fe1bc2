#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardioState {
    pub minutes: u32,
    pub seconds: u32,
    pub running: bool,
}

#[derive(Debug, Clone, Copy)]
pub enum CardioAction {
    Start,
    Pause,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardioEffect {
    StartTicker,
    StopTicker,
}

impl CardioState {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes,
            seconds,
            running: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes.saturating_mul(60).saturating_add(self.seconds)
    }

    // The tick source should run exactly while this is true.
    pub fn ticking(&self) -> bool {
        self.running && !self.finished()
    }

    pub fn reduce(&mut self, action: CardioAction) -> Option<CardioEffect> {
        let was_ticking = self.ticking();
        match action {
            CardioAction::Start => self.running = true,
            CardioAction::Pause => self.running = false,
            CardioAction::Decrement => {
                if was_ticking {
                    if self.seconds == 0 {
                        self.minutes -= 1;
                        self.seconds = 59;
                    } else {
                        self.seconds -= 1;
                    }
                }
            }
        }
        match (was_ticking, self.ticking()) {
            (false, true) => Some(CardioEffect::StartTicker),
            (true, false) => Some(CardioEffect::StopTicker),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_begins_ticking() {
        let mut state = CardioState::new(20, 0);
        assert_eq!(
            state.reduce(CardioAction::Start),
            Some(CardioEffect::StartTicker)
        );
        assert!(state.ticking());
    }

    #[test]
    fn countdown_borrows_a_minute() {
        let mut state = CardioState::new(1, 0);
        state.reduce(CardioAction::Start);
        assert_eq!(state.reduce(CardioAction::Decrement), None);
        assert_eq!((state.minutes, state.seconds), (0, 59));
    }

    #[test]
    fn reaching_zero_stops_the_ticker() {
        let mut state = CardioState::new(0, 1);
        state.reduce(CardioAction::Start);
        assert_eq!(
            state.reduce(CardioAction::Decrement),
            Some(CardioEffect::StopTicker)
        );
        assert!(state.finished());
    }

    #[test]
    fn pause_stops_and_start_resumes() {
        let mut state = CardioState::new(5, 30);
        state.reduce(CardioAction::Start);
        assert_eq!(
            state.reduce(CardioAction::Pause),
            Some(CardioEffect::StopTicker)
        );
        assert_eq!(
            state.reduce(CardioAction::Start),
            Some(CardioEffect::StartTicker)
        );
        assert_eq!((state.minutes, state.seconds), (5, 30));
    }

    #[test]
    fn finished_clock_ignores_ticks() {
        let mut state = CardioState::new(0, 0);
        state.reduce(CardioAction::Start);
        assert_eq!(state.reduce(CardioAction::Decrement), None);
        assert_eq!((state.minutes, state.seconds), (0, 0));
    }

    #[test]
    fn start_on_a_finished_clock_does_not_tick() {
        let mut state = CardioState::new(0, 0);
        assert_eq!(state.reduce(CardioAction::Start), None);
        assert!(!state.ticking());
    }

    #[test]
    fn clock_arithmetic_saturates_on_absurd_input() {
        assert_eq!(CardioState::new(u32::MAX, 59).total_seconds(), u32::MAX);
        assert_eq!(CardioState::new(2, 30).total_seconds(), 150);
    }
}
