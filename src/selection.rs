use chrono::NaiveDate;

/// The active day, if any. While a day is active its markers are listed in
/// the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    None,
    Active(NaiveDate),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::None
    }
}

impl Selection {
    /// Activates `date`, or deactivates it if it already is the active day.
    pub fn toggle(&mut self, date: NaiveDate) {
        *self = match *self {
            Selection::Active(active) if active == date => Selection::None,
            _ => Selection::Active(date),
        };
    }

    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    pub fn active(&self) -> Option<NaiveDate> {
        match self {
            Selection::Active(date) => Some(*date),
            Selection::None => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Active(_))
    }

    pub fn is_active_day(&self, date: &NaiveDate) -> bool {
        self.active().as_ref() == Some(date)
    }
}
