use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use super::Context;
use crate::agenda::Marker;

/// Side panel listing the markers of the active day.
pub struct EventPanel<'a> {
    context: &'a Context,
}

impl<'a> EventPanel<'a> {
    pub fn new(context: &'a Context) -> Self {
        EventPanel { context }
    }

    fn item(&self, marker: &Marker) -> ListItem<'a> {
        let theme = &self.context.theme;
        let (check, style) = if marker.done {
            ("[x] ", theme.done_style)
        } else {
            ("[ ] ", Style::default())
        };

        let mut spans = vec![
            Span::raw(check),
            Span::styled(marker.name.clone(), style),
        ];

        if !marker.category.is_empty() {
            spans.push(Span::styled(
                format!(" ({})", marker.category),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        ListItem::new(Spans::from(spans))
    }
}

impl Widget for EventPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let date = match self.context.selection().active() {
            Some(date) => date,
            None => return,
        };
        let theme = &self.context.theme;

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            self.context.locale.panel_date(&date),
            theme.panel_header_style,
        ));

        let items: Vec<ListItem> = self
            .context
            .agenda()
            .markers_of_day(&date)
            .map(|marker| self.item(marker))
            .collect();

        if items.is_empty() {
            Paragraph::new(Span::styled("No events", theme.error_style))
                .block(block)
                .render(area, buf);
            return;
        }

        let mut state = ListState::default();
        state.select(Some(self.context.panel_index.min(items.len() - 1)));

        StatefulWidget::render(
            List::new(items)
                .block(block)
                .highlight_style(theme.panel_highlight_style),
            area,
            buf,
            &mut state,
        );
    }
}

/// Moves the highlighted row of the panel.
pub fn scroll_panel(context: &mut Context, forwards: bool) {
    let len = context.num_markers_of_active_day();
    if forwards {
        if context.panel_index + 1 < len {
            context.panel_index += 1;
        }
    } else if context.panel_index > 0 {
        context.panel_index -= 1;
    }
}
