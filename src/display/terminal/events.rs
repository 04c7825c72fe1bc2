use crossterm::event::{self, KeyEvent};
use std::{sync::mpsc, thread, time::Duration};

pub enum Event<I> {
    Input(I),
    Tick,
}

// Polls the terminal for key presses on a dedicated thread and
// interleaves them with redraw ticks. The thread stops once the
// receiving side is gone.
pub struct Events {
    rx: mpsc::Receiver<Event<KeyEvent>>,
}

impl Events {
    pub fn new(tick_rate: Duration) -> Events {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if matches!(event::poll(tick_rate), Ok(true)) {
                if let Ok(event::Event::Key(key)) = event::read() {
                    if tx.send(Event::Input(key)).is_err() {
                        break;
                    }
                }
            }

            if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        Events { rx }
    }

    pub fn next(&self) -> Result<Event<KeyEvent>, mpsc::RecvError> {
        self.rx.recv()
    }
}
