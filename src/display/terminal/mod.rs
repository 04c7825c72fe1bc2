mod events;
mod terminal;

pub use self::events::{Event, Events};
pub use self::terminal::App;
