mod catalog;
pub use catalog::{Catalog, Query, SortOrder};

/// The chat assistant conversation.
pub mod chatbot;
pub use chatbot::{ChatMessage, Chatbot};

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod notifications;
pub use notifications::Snackbar;

mod seed;

mod session;
pub use session::Session;

mod store;
pub use store::{Error, Store};

mod timers;
pub use timers::{TimerHandle, TimerQueue};
