use chrono::{Datelike, NaiveDate};

use crate::agenda::Agenda;
use crate::grid::{MonthGrid, MonthIndex};
use crate::locale::Locale;
use crate::ui::calendar_window::DayCell;
use crate::ui::Theme;

/// Plain text rendition of `month` for `--show`, laid out like the
/// interactive view and followed by the markers of the month.
pub fn render_month(
    month: &MonthIndex,
    today: &NaiveDate,
    agenda: &Agenda,
    locale: Locale,
) -> String {
    let theme = Theme::default();
    let grid = MonthGrid::new(&month.first_day(), today);
    let width = DayCell::CELL_WIDTH as usize;

    let mut out = String::new();
    push_line(&mut out, &locale.month_label(month));

    let labels: Vec<String> = locale
        .weekday_labels()
        .iter()
        .map(|label| format!("{:<width$}", label, width = width))
        .collect();
    push_line(&mut out, &labels.concat());

    let mut line = String::new();
    let mut row = 0;
    for cell in grid.cells() {
        if cell.row != row {
            push_line(&mut out, &line);
            line.clear();
            row = cell.row;
        }

        let x = cell.column as usize * width;
        while line.chars().count() < x {
            line.push(' ');
        }

        let marker = theme.marker_for(agenda.markers_of_day(&cell.date));
        line.push_str(&DayCell::new(cell, &theme).marker(marker).to_string());
    }
    push_line(&mut out, &line);

    let mut markers = agenda.markers_of_month(month).collect::<Vec<_>>();
    if !markers.is_empty() {
        markers.sort_by_key(|marker| marker.date);
        out.push('\n');
        for marker in markers {
            out.push_str(&format!(
                "{:>2} [{}] {}",
                marker.date.day(),
                if marker.done { 'x' } else { ' ' },
                marker.name
            ));
            if !marker.category.is_empty() {
                out.push_str(&format!(" ({})", marker.category));
            }
            out.push('\n');
        }
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}
