use chrono::Datelike;
use std::fmt::Display;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::Span;
use tui::widgets::{Block, Borders, Widget};

use super::{Context, Theme};
use crate::grid::{GridCell, MonthGrid, COLUMNS};

pub struct DayCell<'a> {
    cell: &'a GridCell,
    marker: Option<char>,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    pub const CELL_HEIGHT: u16 = 1;
    pub const CELL_WIDTH: u16 = 5;

    pub fn new(cell: &'a GridCell, theme: &'a Theme) -> Self {
        DayCell {
            cell,
            marker: None,
            theme,
        }
    }

    pub fn marker(mut self, marker: Option<char>) -> Self {
        self.marker = marker;
        self
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arg_today = if self.cell.is_today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(
            f,
            "{}{:>2}{} ",
            arg_today,
            self.cell.date.day(),
            self.marker.unwrap_or(' ')
        )
    }
}

/// Weekday labels and the day cells of one month. Each day is drawn at the
/// column and row the grid assigned to it.
pub struct MonthPane<'a> {
    grid: MonthGrid,
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    pub const LABEL_ROWS: u16 = 1;

    pub fn new(context: &'a Context) -> Self {
        MonthPane {
            grid: context.grid(),
            context,
        }
    }

    pub fn width() -> u16 {
        COLUMNS as u16 * DayCell::CELL_WIDTH
    }

    pub fn height(&self) -> u16 {
        Self::LABEL_ROWS + self.grid.num_weeks() as u16 * DayCell::CELL_HEIGHT
    }

    fn marker_of(&self, cell: &GridCell) -> Option<char> {
        self.context
            .theme
            .marker_for(self.context.agenda().markers_of_day(&cell.date))
    }

    fn cell_style(&self, cell: &GridCell) -> Style {
        let theme = &self.context.theme;

        let mut style = if cell.is_past {
            theme.past_day_style
        } else {
            theme.day_style
        };

        if cell.is_today {
            style = style.patch(theme.today_day_style);
        }

        if self.context.selection().is_active_day(&cell.date) {
            style = style.patch(theme.active_day_style);
        }

        if cell.date == self.context.current() {
            style = style.patch(theme.focus_day_style);
        }

        style
    }
}

impl Widget for MonthPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.context.theme;

        for (col, label) in self.context.locale.weekday_labels().iter().enumerate() {
            let x = col as u16 * DayCell::CELL_WIDTH;
            if x + DayCell::CELL_WIDTH > area.width {
                break;
            }
            buf.set_string(area.x + x, area.y, label, theme.label_style);
        }

        for cell in self.grid.cells() {
            let x = cell.column as u16 * DayCell::CELL_WIDTH;
            let y = Self::LABEL_ROWS + cell.row as u16 * DayCell::CELL_HEIGHT;

            if x + DayCell::CELL_WIDTH > area.width || y >= area.height {
                log::trace!("No room for {} in {:?}", cell.date, area);
                continue;
            }

            let day = DayCell::new(cell, theme).marker(self.marker_of(cell));
            buf.set_string(
                area.x + x,
                area.y + y,
                day.to_string(),
                self.cell_style(cell),
            );
        }
    }
}

/// The month pane framed by a border carrying the month label.
pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }

    pub fn width() -> u16 {
        MonthPane::width() + 2
    }

    pub fn height(&self) -> u16 {
        MonthPane::new(self.context).height() + 2
    }
}

impl Widget for CalendarWindow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.context.theme;
        let label = self
            .context
            .locale
            .month_label(&self.context.current_month());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(label, theme.month_header_style));
        let inner = block.inner(area);
        block.render(area, buf);

        MonthPane::new(self.context).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{Agenda, Marker};
    use crate::locale::Locale;
    use crate::selection::Selection;
    use chrono::NaiveDate;
    use tui::style::{Color, Modifier};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol.clone())
            .collect()
    }

    fn context() -> Context {
        let agenda = Agenda::new(vec![
            Marker::new("Dentist", "health", date(2026, 10, 5)),
            Marker::new("Review", "work", date(2026, 10, 12)).done(true),
        ]);
        Context::new(agenda, Locale::En).with_today(date(2026, 10, 18))
    }

    #[test]
    fn days_are_placed_at_their_column_and_row() {
        let ctx = context();
        let area = Rect::new(0, 0, MonthPane::width(), 6);
        let mut buf = Buffer::empty(area);
        MonthPane::new(&ctx).render(area, &mut buf);

        assert_eq!(
            row(&buf, 0),
            "Mon. Tue. Wed. Thu. Fri. Sat. Sun. "
        );
        // October 2026 starts on a Thursday, no blanks are written before it
        assert_eq!(&row(&buf, 1)[15..], "  1    2    3    4  ");
        assert_eq!(row(&buf, 2), "  5•   6    7    8    9   10   11  ");
        assert_eq!(row(&buf, 3), " 12◦  13   14   15   16   17  *18  ");
    }

    #[test]
    fn focus_and_active_styles() {
        let mut ctx = context();
        ctx.goto(date(2026, 10, 5));
        ctx.toggle_active();
        assert_eq!(ctx.selection(), Selection::Active(date(2026, 10, 5)));

        let area = Rect::new(0, 0, MonthPane::width(), 6);
        let mut buf = Buffer::empty(area);
        MonthPane::new(&ctx).render(area, &mut buf);

        // past day, then active, then focus on top
        let expected = Style::default()
            .fg(Color::Magenta)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD);
        assert_eq!(buf.get(1, 2).style(), expected);

        let today = buf.get(31, 3).style();
        assert!(today.add_modifier.contains(Modifier::REVERSED));
        assert_eq!(today.fg, Some(Color::Reset));
    }

    #[test]
    fn window_shows_month_label() {
        let ctx = context();
        let area = Rect::new(0, 0, CalendarWindow::width(), 9);
        let mut buf = Buffer::empty(area);
        CalendarWindow::new(&ctx).render(area, &mut buf);

        assert!(row(&buf, 0).contains("October 2026"));
        assert!(row(&buf, 1).contains("Mon."));
    }
}
