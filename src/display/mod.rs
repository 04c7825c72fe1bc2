mod terminal;

pub use self::terminal::App as TerminalApp;
pub use self::terminal::{Event, Events};

mod null;

pub use self::null::App as Headless;
