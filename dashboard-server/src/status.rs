//! Service status summary and recent updates.
//!
//! Both are derived from one batch of train records: no history is kept
//! between refreshes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Line, TrainRecord};

/// Delays at or below this many seconds are ignored.
const DELAY_THRESHOLD_SECS: i64 = 300;

/// A line is listed as delayed when its average delay rounds to at least
/// this many minutes.
const LINE_DELAY_MINS: i64 = 5;

/// Any one line averaging this many minutes makes the status major.
const MAJOR_DELAY_MINS: i64 = 10;

/// Delays above this many seconds count as a service disruption.
const DISRUPTION_SECS: i64 = 600;

/// Maximum number of entries in the recent updates list.
const MAX_UPDATES: usize = 5;

/// Overall service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusLevel {
    #[serde(rename = "On Time")]
    OnTime,
    #[serde(rename = "Minor Delays")]
    MinorDelays,
    #[serde(rename = "Major Delays")]
    MajorDelays,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::OnTime => "On Time",
            StatusLevel::MinorDelays => "Minor Delays",
            StatusLevel::MajorDelays => "Major Delays",
        }
    }
}

/// Average delay on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDelay {
    pub line: Line,
    pub average_minutes: i64,
    pub delayed_trains: usize,
}

/// Summary of the current service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainStatus {
    pub status: StatusLevel,
    pub details: String,
    pub delayed_lines: Vec<LineDelay>,
}

/// Summarize delays across a batch.
///
/// Only trains delayed by more than five minutes count. A line is reported
/// when its average over those trains rounds to five minutes or more, and
/// a single line at ten minutes or more makes the whole service major.
pub fn train_status<'a>(records: impl IntoIterator<Item = &'a TrainRecord>) -> TrainStatus {
    let mut per_line: BTreeMap<Line, Vec<i64>> = BTreeMap::new();
    for record in records {
        if let Some(delay) = record.delay_secs
            && delay.abs() > DELAY_THRESHOLD_SECS
        {
            per_line.entry(record.line).or_default().push(delay.abs());
        }
    }

    let delayed_lines: Vec<LineDelay> = per_line
        .into_iter()
        .filter_map(|(line, delays)| {
            let total: i64 = delays.iter().sum();
            let average_minutes = rounded_minutes(total, delays.len());
            (average_minutes >= LINE_DELAY_MINS).then_some(LineDelay {
                line,
                average_minutes,
                delayed_trains: delays.len(),
            })
        })
        .collect();

    if delayed_lines.is_empty() {
        return TrainStatus {
            status: StatusLevel::OnTime,
            details: "All lines operating normally".to_string(),
            delayed_lines,
        };
    }

    let status = if delayed_lines
        .iter()
        .any(|d| d.average_minutes >= MAJOR_DELAY_MINS)
    {
        StatusLevel::MajorDelays
    } else {
        StatusLevel::MinorDelays
    };

    let details = delayed_lines
        .iter()
        .map(|d| format!("{} Line: {} minute delays", d.line, d.average_minutes))
        .collect::<Vec<_>>()
        .join(", ");

    TrainStatus {
        status,
        details,
        delayed_lines,
    }
}

fn rounded_minutes(total_secs: i64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    let avg_secs = total_secs as f64 / count as f64;
    (avg_secs / 60.0).round() as i64
}

/// Kind of service update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateKind {
    OnTime,
    Delayed,
    Disrupted,
}

/// One entry in the recent updates list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceUpdate {
    pub kind: UpdateKind,
    pub message: String,
}

/// Service updates worth showing for a batch, most severe first.
///
/// Disruptions come from trains delayed by more than ten minutes, one per
/// line. Lines with shorter delays are reported as delayed. If nothing is
/// late a single on-time update is returned.
pub fn recent_updates<'a, I>(records: I) -> Vec<ServiceUpdate>
where
    I: IntoIterator<Item = &'a TrainRecord> + Clone,
{
    let mut updates = Vec::new();
    let mut disrupted: Vec<Line> = Vec::new();

    for record in records.clone() {
        let Some(delay) = record.delay_secs else {
            continue;
        };
        if delay > DISRUPTION_SECS && !disrupted.contains(&record.line) {
            disrupted.push(record.line);
            let message = match &record.destination {
                Some(destination) => format!(
                    "Service disruption on {} Line between {} and {}",
                    record.line, record.station, destination
                ),
                None => format!(
                    "Service disruption on {} Line near {}",
                    record.line, record.station
                ),
            };
            updates.push(ServiceUpdate {
                kind: UpdateKind::Disrupted,
                message,
            });
        }
    }

    let status = train_status(records);
    for delay in &status.delayed_lines {
        if disrupted.contains(&delay.line) {
            continue;
        }
        updates.push(ServiceUpdate {
            kind: UpdateKind::Delayed,
            message: format!(
                "{} Line trains running about {} minutes late",
                delay.line, delay.average_minutes
            ),
        });
    }

    if updates.is_empty() {
        updates.push(ServiceUpdate {
            kind: UpdateKind::OnTime,
            message: "All trains running on schedule".to_string(),
        });
    }

    updates.truncate(MAX_UPDATES);
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawTrainRecord;

    fn train(line: &str, station: &str, delay: Option<&str>) -> TrainRecord {
        TrainRecord::from_raw(&RawTrainRecord {
            train_id: Some("1".into()),
            line: Some(line.into()),
            station: Some(station.into()),
            destination: Some("AIRPORT".into()),
            delay: delay.map(String::from),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn no_records_is_on_time() {
        let none: Vec<TrainRecord> = Vec::new();
        let status = train_status(&none);
        assert_eq!(status.status, StatusLevel::OnTime);
        assert_eq!(status.details, "All lines operating normally");
        assert!(status.delayed_lines.is_empty());
    }

    #[test]
    fn small_delays_ignored() {
        let records = vec![
            train("RED", "FIVE POINTS", Some("T300S")),
            train("RED", "GARNETT", Some("T-120S")),
            train("GOLD", "MIDTOWN", None),
        ];
        assert_eq!(train_status(&records).status, StatusLevel::OnTime);
    }

    #[test]
    fn minor_delay_on_one_line() {
        let records = vec![
            train("RED", "FIVE POINTS", Some("T420S")),
            train("GOLD", "MIDTOWN", Some("T0S")),
        ];
        let status = train_status(&records);
        assert_eq!(status.status, StatusLevel::MinorDelays);
        assert_eq!(status.details, "RED Line: 7 minute delays");
        assert_eq!(
            status.delayed_lines,
            vec![LineDelay {
                line: Line::Red,
                average_minutes: 7,
                delayed_trains: 1,
            }]
        );
    }

    #[test]
    fn major_delays_across_lines() {
        let records = vec![
            train("BLUE", "DECATUR", Some("T900S")),
            train("GREEN", "ASHBY", Some("T720S")),
        ];
        let status = train_status(&records);
        assert_eq!(status.status, StatusLevel::MajorDelays);
        assert_eq!(
            status.details,
            "GREEN Line: 12 minute delays, BLUE Line: 15 minute delays"
        );
    }

    #[test]
    fn one_badly_delayed_line_is_major() {
        let records = vec![
            train("RED", "GARNETT", Some("T360S")),
            train("GOLD", "LENOX", Some("T360S")),
            train("BLUE", "DECATUR", Some("T840S")),
        ];
        let status = train_status(&records);
        assert_eq!(status.status, StatusLevel::MajorDelays);
        assert_eq!(
            status.details,
            "RED Line: 6 minute delays, GOLD Line: 6 minute delays, BLUE Line: 14 minute delays"
        );
    }

    #[test]
    fn status_serializes_display_names() {
        let none: Vec<TrainRecord> = Vec::new();
        let json = serde_json::to_value(train_status(&none)).unwrap();
        assert_eq!(json["status"], "On Time");
        assert!(json["delayedLines"].as_array().unwrap().is_empty());
    }

    #[test]
    fn on_time_update_when_nothing_late() {
        let updates = recent_updates(&[train("RED", "FIVE POINTS", Some("T0S"))]);
        assert_eq!(
            updates,
            vec![ServiceUpdate {
                kind: UpdateKind::OnTime,
                message: "All trains running on schedule".into(),
            }]
        );
    }

    #[test]
    fn disruption_named_by_first_late_train() {
        let records = vec![
            train("RED", "MIDTOWN", Some("T700S")),
            train("RED", "ARTS CENTER", Some("T800S")),
            train("GOLD", "LENOX", Some("T400S")),
        ];
        let updates = recent_updates(&records);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].kind, UpdateKind::Disrupted);
        assert_eq!(
            updates[0].message,
            "Service disruption on RED Line between MIDTOWN and AIRPORT"
        );
        assert_eq!(updates[1].kind, UpdateKind::Delayed);
        assert_eq!(
            updates[1].message,
            "GOLD Line trains running about 7 minutes late"
        );
    }

    #[test]
    fn update_kinds_serialize_kebab_case() {
        let json = serde_json::to_value(UpdateKind::OnTime).unwrap();
        assert_eq!(json, "on-time");
    }
}
