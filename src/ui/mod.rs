pub mod app;
pub mod calendar_window;
pub mod command;
pub mod context;
pub mod panel;

pub use app::App;
pub use calendar_window::{CalendarWindow, MonthPane};
pub use command::{Command, CommandParser};
pub use context::{Context, Mode, Theme};
pub use panel::EventPanel;
