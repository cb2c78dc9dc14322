use termion::event::Key;
use tui::backend::Backend;
use tui::layout::{Constraint, Direction, Layout, Rect};
use tui::style::Style;
use tui::text::{Span, Spans};
use tui::widgets::Paragraph;
use tui::{Frame, Terminal};

use crate::agenda::Agenda;
use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::grid::MonthIndex;

use super::panel::{scroll_panel, EventPanel};
use super::{CalendarWindow, CommandParser, Context, Mode};

const HINT: &str = "h/j/k/l: move  n/p: month  enter: select  esc: clear  :: command  q: quit";

pub struct App {
    context: Context,
}

impl App {
    pub fn new(config: &Config, agenda: Agenda) -> App {
        let context = Context::new(agenda, config.locale);
        App { context }
    }

    pub fn with_context(context: Context) -> App {
        App { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Starts on the first day of `month` instead of today.
    pub fn show_month(&mut self, month: MonthIndex) {
        self.context.goto(month.first_day());
    }

    pub fn handle_key(&mut self, key: Key) {
        match self.context.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Command => self.handle_command(key),
        }
    }

    fn handle_normal(&mut self, key: Key) {
        let ctx = &mut self.context;
        match key {
            Key::Char('q') => ctx.request_quit(),
            Key::Char(':') => {
                ctx.mode = Mode::Command;
                ctx.last_error_message = None;
            }
            Key::Char('h') | Key::Left => ctx.move_days(-1),
            Key::Char('l') | Key::Right => ctx.move_days(1),
            Key::Char('k') | Key::Up => ctx.move_days(-7),
            Key::Char('j') | Key::Down => ctx.move_days(7),
            Key::Char('n') | Key::Char('>') => ctx.next_month(1),
            Key::Char('p') | Key::Char('<') => ctx.prev_month(1),
            Key::Char('\n') | Key::Char(' ') => ctx.toggle_active(),
            Key::Char('t') => ctx.goto_today(),
            Key::Char(']') => scroll_panel(ctx, true),
            Key::Char('[') => scroll_panel(ctx, false),
            Key::Esc => ctx.clear_selection(),
            _ => log::trace!("Unhandled key {:?}", key),
        }
    }

    fn handle_command(&mut self, key: Key) {
        match key {
            Key::Esc => {
                self.context.command_line.clear();
                self.context.mode = Mode::Normal;
            }
            Key::Char('\n') => CommandParser::new(&mut self.context).submit(),
            Key::Backspace => {
                if self.context.command_line.pop().is_none() {
                    self.context.mode = Mode::Normal;
                }
            }
            Key::Char(c) => self.context.command_line.push(c),
            _ => {}
        }
    }

    fn bottom_bar(&self) -> Paragraph<'_> {
        let theme = &self.context.theme;
        let line = match (&self.context.mode, &self.context.last_error_message) {
            (Mode::Command, Some(err)) => Spans::from(vec![
                Span::raw(format!(":{}  ", self.context.command_line)),
                Span::styled(err.clone(), theme.error_style),
            ]),
            (Mode::Command, None) => Spans::from(format!(":{}", self.context.command_line)),
            (Mode::Normal, Some(err)) => Spans::from(Span::styled(err.clone(), theme.error_style)),
            (Mode::Normal, None) => Spans::from(Span::styled(HINT, Style::default())),
        };
        Paragraph::new(line)
    }

    pub fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.size());

        let calendar = CalendarWindow::new(&self.context);
        let calendar_height = calendar.height().min(rows[0].height);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Length(CalendarWindow::width()),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(rows[0]);

        f.render_widget(
            calendar,
            Rect::new(columns[0].x, columns[0].y, columns[0].width, calendar_height),
        );

        if self.context.selection().is_active() {
            f.render_widget(EventPanel::new(&self.context), columns[1]);
        }

        f.render_widget(self.bottom_bar(), rows[1]);

        if self.context.mode == Mode::Command {
            let x = rows[1].x + 1 + self.context.command_line.chars().count() as u16;
            f.set_cursor(x.min(rows[1].right().saturating_sub(1)), rows[1].y);
        }
    }

    pub fn run<B: Backend>(
        &mut self,
        dispatcher: Dispatcher,
        terminal: &mut Terminal<B>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while !self.context.quit_requested() {
            // Draw
            terminal.draw(|f| self.draw(f))?;

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Input(key) => self.handle_key(key),
            }
        }

        log::info!("Quitting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::Marker;
    use crate::locale::Locale;
    use crate::selection::Selection;
    use chrono::NaiveDate;
    use tui::backend::TestBackend;
    use tui::buffer::Buffer;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let agenda = Agenda::new(vec![Marker::new("Dentist", "health", date(2026, 10, 20))]);
        App::with_context(Context::new(agenda, Locale::En).with_today(date(2026, 10, 18)))
    }

    fn keys(app: &mut App, keys: &[Key]) {
        for &key in keys {
            app.handle_key(key);
        }
    }

    fn screen(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(&buf.get(x, y).symbol);
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn month_navigation_keys() {
        let mut app = app();
        keys(&mut app, &[Key::Char('n')]);
        assert_eq!(app.context().current(), date(2026, 11, 1));
        keys(&mut app, &[Key::Char('p')]);
        assert_eq!(app.context().current(), date(2026, 10, 1));
        keys(&mut app, &[Key::Char('t')]);
        assert_eq!(app.context().current(), date(2026, 10, 18));
    }

    #[test]
    fn cursor_keys_move_by_day_and_week() {
        let mut app = app();
        keys(&mut app, &[Key::Char('l'), Key::Char('l'), Key::Char('j'), Key::Char('k')]);
        assert_eq!(app.context().current(), date(2026, 10, 20));
        keys(&mut app, &[Key::Left]);
        assert_eq!(app.context().current(), date(2026, 10, 19));
    }

    #[test]
    fn enter_toggles_and_esc_clears() {
        let mut app = app();
        keys(&mut app, &[Key::Char('l'), Key::Char('l'), Key::Char('\n')]);
        assert_eq!(app.context().selection(), Selection::Active(date(2026, 10, 20)));

        keys(&mut app, &[Key::Char('\n')]);
        assert_eq!(app.context().selection(), Selection::None);
        assert_eq!(app.context().current(), date(2026, 10, 18));

        keys(&mut app, &[Key::Char('n'), Key::Char(' '), Key::Esc]);
        assert_eq!(app.context().selection(), Selection::None);
        assert_eq!(app.context().current(), date(2026, 10, 18));
    }

    #[test]
    fn command_mode_runs_commands() {
        let mut app = app();
        let typed: Vec<Key> = ":goto 2027-03\n".chars().map(Key::Char).collect();
        keys(&mut app, &typed);
        assert_eq!(app.context().mode, Mode::Normal);
        assert_eq!(app.context().current(), date(2027, 3, 1));

        keys(&mut app, &[Key::Char(':'), Key::Char('x'), Key::Backspace, Key::Backspace]);
        assert_eq!(app.context().mode, Mode::Normal);

        let typed: Vec<Key> = ":quit\n".chars().map(Key::Char).collect();
        keys(&mut app, &typed);
        assert!(app.context().quit_requested());
    }

    #[test]
    fn panel_only_drawn_while_active() {
        let mut app = app();
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| app.draw(f)).unwrap();
        let closed = screen(terminal.backend().buffer());
        assert!(closed.contains("October 2026"));
        assert!(!closed.contains("Dentist"));
        assert!(closed.contains("q: quit"));

        keys(&mut app, &[Key::Char('l'), Key::Char('l'), Key::Char('\n')]);
        terminal.draw(|f| app.draw(f)).unwrap();
        let open = screen(terminal.backend().buffer());
        assert!(open.contains("Tue. 20 october"));
        assert!(open.contains("[ ] Dentist (health)"));
    }
}
