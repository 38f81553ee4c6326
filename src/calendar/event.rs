use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Server-assigned identifier. Only ever used to build request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => EventId(n.to_string()),
            Raw::Text(s) => EventId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn duration_display(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Orders by start time; unparsable times sort after valid ones.
    pub fn cmp_start(&self, other: &Self) -> Ordering {
        let parse = |t: &str| NaiveTime::parse_from_str(t.trim(), TIME_FORMAT).ok();
        match (parse(&self.start_time), parse(&other.start_time)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.start_time.cmp(&other.start_time),
        }
    }
}

/// Raw contents of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

impl EventFields {
    pub fn validate(&self) -> Result<EventDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }

        let start = self.start_time.trim();
        let end = self.end_time.trim();
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::MissingTimes);
        }

        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
        for time in [start, end] {
            NaiveTime::parse_from_str(time, TIME_FORMAT)
                .map_err(|_| ValidationError::InvalidTime(time.to_string()))?;
        }

        Ok(EventDraft {
            title: title.to_string(),
            date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

impl From<&CalendarEvent> for EventFields {
    fn from(ev: &CalendarEvent) -> Self {
        Self {
            title: ev.title.clone(),
            date: ev.date.format(DATE_FORMAT).to_string(),
            start_time: ev.start_time.clone(),
            end_time: ev.end_time.clone(),
            description: ev.description.clone().unwrap_or_default(),
        }
    }
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> EventFields {
        EventFields {
            title: "  AGM ".into(),
            date: "2024-03-15".into(),
            start_time: "18:00".into(),
            end_time: "20:00".into(),
            description: " Annual meeting\n".into(),
        }
    }

    #[test]
    fn decodes_numeric_and_string_ids() {
        let json = r#"[
            {"id": 7, "title": "AGM", "date": "2024-03-15", "start_time": "18:00", "end_time": "20:00", "description": null},
            {"id": "abc", "title": "Ride", "date": "2024-03-16", "start_time": "09:00", "end_time": "12:00"}
        ]"#;
        let events: Vec<CalendarEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].id.as_str(), "7");
        assert_eq!(events[1].id.as_str(), "abc");
        assert_eq!(events[0].description(), None);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn validate_trims_and_keeps_times() {
        let draft = fields().validate().unwrap();
        assert_eq!(draft.title, "AGM");
        assert_eq!(draft.description, "Annual meeting");
        assert_eq!(draft.start_time, "18:00");

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["date"], "2024-03-15");
        assert_eq!(body["end_time"], "20:00");
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let mut f = fields();
        f.title = "   ".into();
        assert_eq!(f.validate(), Err(ValidationError::MissingTitle));

        let mut f = fields();
        f.date.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingDate));

        let mut f = fields();
        f.end_time.clear();
        assert_eq!(f.validate(), Err(ValidationError::MissingTimes));
    }

    #[test]
    fn validate_rejects_malformed_values() {
        let mut f = fields();
        f.date = "15/03/2024".into();
        assert!(matches!(f.validate(), Err(ValidationError::InvalidDate(_))));

        let mut f = fields();
        f.start_time = "25:00".into();
        assert_eq!(f.validate(), Err(ValidationError::InvalidTime("25:00".into())));
    }

    #[test]
    fn start_ordering_puts_garbage_last() {
        let mk = |start: &str| CalendarEvent {
            id: EventId::new("1"),
            title: "x".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            start_time: start.into(),
            end_time: "23:00".into(),
            description: None,
        };
        assert_eq!(mk("09:00").cmp_start(&mk("18:30")), Ordering::Less);
        assert_eq!(mk("soon").cmp_start(&mk("10:00")), Ordering::Greater);
    }
}
