use chrono::NaiveDate;

use crate::config::{Config, MarkerSpec};
use crate::error::{Error, ErrorKind, Result};
use crate::grid::MonthIndex;

/// A scheduled item shown as a dot on its day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub category: String,
    pub date: NaiveDate,
    pub done: bool,
}

impl Marker {
    pub fn new(name: &str, category: &str, date: NaiveDate) -> Self {
        Marker {
            name: name.to_owned(),
            category: category.to_owned(),
            date,
            done: false,
        }
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn is_on(&self, date: &NaiveDate) -> bool {
        self.date == *date
    }
}

impl std::convert::TryFrom<&MarkerSpec> for Marker {
    type Error = Error;

    fn try_from(spec: &MarkerSpec) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&spec.date, "%Y-%m-%d").map_err(|e| {
            Error::new(
                ErrorKind::ConfigParse,
                &format!(
                    "marker '{}' has invalid date '{}': {}",
                    spec.name, spec.date, e
                ),
            )
        })?;

        Ok(Marker {
            name: spec.name.clone(),
            category: spec.category.clone(),
            date,
            done: spec.done,
        })
    }
}

/// In-memory list of markers. Order is the order of insertion.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    markers: Vec<Marker>,
}

impl Agenda {
    pub fn new(markers: Vec<Marker>) -> Self {
        Agenda { markers }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        use std::convert::TryFrom;

        let markers = config
            .markers
            .iter()
            .map(Marker::try_from)
            .collect::<Result<Vec<_>>>()?;

        log::info!("Loaded {} markers", markers.len());

        Ok(Agenda { markers })
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers whose date is exactly `date`, in list order.
    pub fn markers_of_day<'a>(
        &'a self,
        date: &'a NaiveDate,
    ) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers.iter().filter(move |marker| marker.is_on(date))
    }

    pub fn has_markers(&self, date: &NaiveDate) -> bool {
        self.markers_of_day(date).next().is_some()
    }

    pub fn markers_of_month<'a>(
        &'a self,
        month: &'a MonthIndex,
    ) -> impl Iterator<Item = &'a Marker> + 'a {
        self.markers
            .iter()
            .filter(move |marker| month.contains(&marker.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Agenda {
        Agenda::new(vec![
            Marker::new("Dentist", "health", date(2026, 10, 18)),
            Marker::new("Groceries", "home", date(2026, 10, 19)),
            Marker::new("Call mom", "family", date(2026, 10, 18)).done(true),
            Marker::new("Dentist", "health", date(2026, 10, 18)),
            Marker::new("Taxes", "admin", date(2025, 10, 18)),
        ])
    }

    #[test]
    fn filters_by_exact_date_in_list_order() {
        let agenda = sample();
        let day = date(2026, 10, 18);
        let names: Vec<_> = agenda.markers_of_day(&day).map(|m| m.name.as_str()).collect();

        // Duplicates stay, same day of another year does not match
        assert_eq!(names, vec!["Dentist", "Call mom", "Dentist"]);
    }

    #[test]
    fn empty_day() {
        let agenda = sample();
        assert_eq!(agenda.markers_of_day(&date(2026, 10, 20)).count(), 0);
        assert!(!agenda.has_markers(&date(2026, 10, 20)));
        assert!(agenda.has_markers(&date(2026, 10, 19)));
    }

    #[test]
    fn markers_of_month() {
        let agenda = sample();
        let october = MonthIndex::from(&date(2026, 10, 1));
        assert_eq!(agenda.markers_of_month(&october).count(), 4);
    }

    #[test]
    fn from_config_rejects_bad_dates() {
        let mut config = Config::default();
        config.markers.push(MarkerSpec {
            name: "Broken".to_owned(),
            category: "misc".to_owned(),
            date: "2026-02-30".to_owned(),
            done: false,
        });

        let err = Agenda::from_config(&config).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn from_config_keeps_fields() {
        let mut config = Config::default();
        config.markers.push(MarkerSpec {
            name: "Review".to_owned(),
            category: "work".to_owned(),
            date: "2026-10-21".to_owned(),
            done: true,
        });

        let agenda = Agenda::from_config(&config).unwrap();
        assert_eq!(
            agenda.markers(),
            &[Marker::new("Review", "work", date(2026, 10, 21)).done(true)]
        );
    }
}
