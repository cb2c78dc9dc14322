use chrono::{Duration, NaiveDate, Utc};

use crate::agenda::{Agenda, Marker};
use crate::grid::{MonthGrid, MonthIndex};
use crate::locale::Locale;
use crate::selection::Selection;

use tui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: Style,
    pub past_day_style: Style,
    pub focus_day_style: Style,
    pub active_day_style: Style,
    pub today_day_style: Style,
    pub today_day_char: Option<char>,
    pub marker_char: char,
    pub done_marker_char: char,
    pub month_header_style: Style,
    pub label_style: Style,
    pub panel_header_style: Style,
    pub panel_highlight_style: Style,
    pub done_style: Style,
    pub error_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            day_style: Style::default(),
            past_day_style: Style::default().fg(Color::DarkGray),
            focus_day_style: Style::default().bg(Color::Blue),
            active_day_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            today_day_style: Style::default()
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::ITALIC),
            today_day_char: Some('*'),
            marker_char: '•',
            done_marker_char: '◦',
            month_header_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Yellow),
            panel_header_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            panel_highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            done_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            error_style: Style::default().fg(Color::LightRed),
        }
    }
}

impl Theme {
    /// Marker shown next to a day holding `markers`, if any.
    pub fn marker_for<'a>(
        &self,
        markers: impl Iterator<Item = &'a Marker>,
    ) -> Option<char> {
        let mut markers = markers.peekable();
        markers.peek()?;

        if markers.all(|marker| marker.done) {
            Some(self.done_marker_char)
        } else {
            Some(self.marker_char)
        }
    }
}

/// State of the month view: the current date, the active day and the
/// terminal specific bits around them.
pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub locale: Locale,
    pub command_line: String,
    pub panel_index: usize,
    pub last_error_message: Option<String>,
    agenda: Agenda,
    current: NaiveDate,
    today: NaiveDate,
    selection: Selection,
    quit: bool,
}

impl Context {
    pub fn new(agenda: Agenda, locale: Locale) -> Self {
        let today = Utc::now().date_naive();
        Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            locale,
            command_line: String::new(),
            panel_index: 0,
            last_error_message: None,
            agenda,
            current: today,
            today,
            selection: Selection::None,
            quit: false,
        }
    }

    /// Pins "today" to `today` and moves the current date there.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self.current = today;
        self
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn current_month(&self) -> MonthIndex {
        MonthIndex::from(&self.current)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(&self.current, &self.today)
    }

    pub fn update(&mut self) {
        let today = Utc::now().date_naive();
        if today != self.today {
            log::debug!("Day changed to {}", today);
            self.today = today;
        }
    }

    pub fn set_current(&mut self, date: NaiveDate) {
        if date != self.current {
            self.panel_index = 0;
        }
        self.current = date;
    }

    pub fn move_days(&mut self, days: i64) {
        if let Some(date) = self.current.checked_add_signed(Duration::days(days)) {
            self.set_current(date);
        }
    }

    pub fn next_month(&mut self, n: u32) {
        let month = self.current_month() + n;
        self.set_current(month.first_day());
    }

    pub fn prev_month(&mut self, n: u32) {
        let month = self.current_month() - n;
        self.set_current(month.first_day());
    }

    pub fn goto(&mut self, date: NaiveDate) {
        self.set_current(date);
    }

    pub fn goto_today(&mut self) {
        let today = self.today;
        self.set_current(today);
    }

    /// Toggles the active day on the current date. Deactivating resets the
    /// current date to today.
    pub fn toggle_active(&mut self) {
        self.selection.toggle(self.current);
        match self.selection {
            Selection::Active(date) => {
                log::debug!("Activated {}", date);
                self.panel_index = 0;
            }
            Selection::None => self.goto_today(),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.goto_today();
    }

    pub fn num_markers_of_active_day(&self) -> usize {
        match self.selection.active() {
            Some(date) => self.agenda.markers_of_day(&date).count(),
            None => 0,
        }
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Takes the typed command line, leaving it empty.
    pub fn finish_line(&mut self) -> String {
        std::mem::take(&mut self.command_line)
    }
}
