//! Askama templates for the dashboard page.

use askama::Template;

use crate::domain::{Line, StationName};
use crate::session::ResolvedTrain;
use crate::status::{StatusLevel, TrainStatus};

/// Maximum number of train cards shown at once.
pub const MAX_CARDS: usize = 6;

// ============================================================================
// Page Templates
// ============================================================================

/// The dashboard page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<String>,
    pub legend: Vec<LegendView>,
    pub selected: Option<String>,
    pub status: StatusView,
    pub cards: TrainCardsTemplate,
    pub poll_secs: u64,
}

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Train cards fragment.
#[derive(Template)]
#[template(path = "train_cards.html")]
pub struct TrainCardsTemplate {
    pub cards: Vec<TrainCardView>,

    /// Trains passing the filter, including those not shown
    pub total: usize,

    pub filter: Option<String>,

    /// "Showing N of M" note, only while filtered and truncated
    pub count_note: Option<String>,
}

impl TrainCardsTemplate {
    /// Build cards for the visible trains, keeping the first [`MAX_CARDS`].
    pub fn new(visible: &[&ResolvedTrain], filter: Option<&StationName>) -> Self {
        let cards: Vec<TrainCardView> = visible
            .iter()
            .take(MAX_CARDS)
            .map(|t| TrainCardView::from_resolved(t))
            .collect();
        let total = visible.len();

        let count_note = filter
            .filter(|_| total > cards.len())
            .map(|station| format!("Showing {} of {total} trains at {station}", cards.len()));

        Self {
            cards,
            total,
            filter: filter.map(|s| s.as_str().to_string()),
            count_note,
        }
    }
}

// ============================================================================
// View Models
// ============================================================================

/// A line in the map legend.
#[derive(Debug, Clone)]
pub struct LegendView {
    pub name: &'static str,
    pub color: &'static str,
}

impl LegendView {
    pub fn all() -> Vec<Self> {
        Line::ALL
            .iter()
            .map(|line| Self {
                name: line.as_str(),
                color: line.color(),
            })
            .collect()
    }
}

/// Service status banner.
#[derive(Debug, Clone)]
pub struct StatusView {
    pub label: &'static str,
    pub details: String,
    pub css_class: &'static str,
}

impl StatusView {
    pub fn from_status(status: &TrainStatus) -> Self {
        let css_class = match status.status {
            StatusLevel::OnTime => "text-success",
            StatusLevel::MinorDelays => "text-warning",
            StatusLevel::MajorDelays => "text-danger",
        };
        Self {
            label: status.status.as_str(),
            details: status.details.clone(),
            css_class,
        }
    }
}

/// One train card.
#[derive(Debug, Clone)]
pub struct TrainCardView {
    pub train_id: String,
    pub line: &'static str,
    pub css_class: &'static str,

    /// Station text as the feed reported it
    pub station: String,

    /// Canonical station, when it differs from the feed text
    pub resolved: Option<String>,

    pub destination: String,
    pub waiting_time: String,
    pub delay: Option<String>,
}

impl TrainCardView {
    pub fn from_resolved(train: &ResolvedTrain) -> Self {
        let record = &train.record;
        let resolved = train
            .station
            .as_ref()
            .map(|s| s.as_str())
            .filter(|name| !record.station.trim().eq_ignore_ascii_case(name))
            .map(String::from);

        Self {
            train_id: record.train_id.clone(),
            line: record.line.as_str(),
            css_class: record.line.css_class(),
            station: record.station.clone(),
            resolved,
            destination: record.destination.clone().unwrap_or_else(|| "Unknown".into()),
            waiting_time: record.waiting_time.clone().unwrap_or_else(|| "--".into()),
            delay: record
                .delay_secs
                .filter(|&secs| secs >= 60)
                .map(|secs| format!("{} min late", secs / 60)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawTrainRecord, TrainRecord};

    fn resolved(id: &str, delay: Option<&str>) -> ResolvedTrain {
        let record = TrainRecord::from_raw(&RawTrainRecord {
            train_id: Some(id.into()),
            line: Some("GOLD".into()),
            station: Some("Doraville Station".into()),
            delay: delay.map(String::from),
            ..Default::default()
        })
        .unwrap();
        ResolvedTrain {
            record,
            station: Some(StationName::parse("DORAVILLE").unwrap()),
        }
    }

    #[test]
    fn cards_capped_with_note_while_filtered() {
        let trains: Vec<ResolvedTrain> = (0..9).map(|i| resolved(&i.to_string(), None)).collect();
        let refs: Vec<&ResolvedTrain> = trains.iter().collect();
        let filter = StationName::parse("DORAVILLE").unwrap();

        let template = TrainCardsTemplate::new(&refs, Some(&filter));
        assert_eq!(template.cards.len(), MAX_CARDS);
        assert_eq!(template.total, 9);

        let html = template.render().unwrap();
        assert_eq!(html.matches("class=\"train-card\"").count(), MAX_CARDS);
        assert!(html.contains("Showing 6 of 9 trains at DORAVILLE"));
    }

    #[test]
    fn no_count_note_when_unfiltered() {
        let trains: Vec<ResolvedTrain> = (0..9).map(|i| resolved(&i.to_string(), None)).collect();
        let refs: Vec<&ResolvedTrain> = trains.iter().collect();

        let template = TrainCardsTemplate::new(&refs, None);
        assert_eq!(template.cards.len(), MAX_CARDS);
        assert!(template.count_note.is_none());
        assert!(!template.render().unwrap().contains("Showing"));
    }

    #[test]
    fn no_count_note_when_everything_fits() {
        let trains = [resolved("1", None)];
        let refs: Vec<&ResolvedTrain> = trains.iter().collect();
        let filter = StationName::parse("DORAVILLE").unwrap();

        assert!(TrainCardsTemplate::new(&refs, Some(&filter)).count_note.is_none());
    }

    #[test]
    fn empty_cards_message() {
        let filter = StationName::parse("OMNI").unwrap();
        let html = TrainCardsTemplate::new(&[], Some(&filter)).render().unwrap();
        assert!(html.contains("No trains found for OMNI"));
    }

    #[test]
    fn card_view_fields() {
        let card = TrainCardView::from_resolved(&resolved("42", Some("T420S")));
        assert_eq!(card.station, "Doraville Station");
        assert_eq!(card.resolved.as_deref(), Some("DORAVILLE"));
        assert_eq!(card.css_class, "bg-warning");
        assert_eq!(card.destination, "Unknown");
        assert_eq!(card.waiting_time, "--");
        assert_eq!(card.delay.as_deref(), Some("7 min late"));
    }

    #[test]
    fn card_shows_feed_text() {
        let html = TrainCardsTemplate::new(&[&resolved("42", None)], None)
            .render()
            .unwrap();
        assert!(html.contains("Doraville Station"));
    }

    #[test]
    fn legend_in_line_order() {
        let names: Vec<_> = LegendView::all().iter().map(|l| l.name).collect();
        assert_eq!(names, ["RED", "GOLD", "GREEN", "BLUE"]);
    }
}
