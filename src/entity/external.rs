//! External representations of the model, as handed across an API boundary.
//!
//! Each struct carries exactly the scalar fields of its record. Owned data
//! (a speaker's bio) is nested; associations (a session's speakers) are not.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub title: String,
    /// ISO-8601, `null` when unset.
    pub start_time: Option<String>,
    pub event_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: i32,
    pub name: String,
    pub bio: Option<Bio>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bio {
    pub id: i32,
    pub bio_text: String,
    pub speaker_id: i32,
}

/// `YYYY-MM-DDTHH:MM:SS`, plus six fractional digits when the fraction is non-zero.
pub fn iso_8601(value: &NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{bios, events, sessions, speakers};
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn iso_8601_omits_zero_fraction() {
        assert_eq!(iso_8601(&at(9, 30, 0)), "2024-05-01T09:30:00");
    }

    #[test]
    fn iso_8601_keeps_microseconds() {
        let value = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 250_000)
            .unwrap();
        assert_eq!(iso_8601(&value), "2024-05-01T09:30:00.250000");
    }

    #[test]
    fn event_has_exactly_its_fields() {
        let event = events::Model {
            id: 3,
            name: "DevConf".into(),
            location: "Hall A".into(),
        };
        assert_eq!(
            serde_json::to_value(event.to_external()).unwrap(),
            json!({"id": 3, "name": "DevConf", "location": "Hall A"})
        );
    }

    #[test]
    fn session_start_time_null_when_unset() {
        let mut session = sessions::Model {
            id: 1,
            title: "Keynote".into(),
            start_time: None,
            event_id: 3,
        };
        assert_eq!(
            serde_json::to_value(session.to_external()).unwrap(),
            json!({"id": 1, "title": "Keynote", "start_time": null, "event_id": 3})
        );

        session.start_time = Some(at(14, 5, 9));
        assert_eq!(
            serde_json::to_value(session.to_external()).unwrap()["start_time"],
            json!("2024-05-01T14:05:09")
        );
    }

    #[test]
    fn speaker_inlines_bio() {
        let speaker = speakers::Model {
            id: 2,
            name: "Ada".into(),
        };
        let bio = bios::Model {
            id: 9,
            bio_text: "Wrote the first program.".into(),
            speaker_id: 2,
        };

        assert_eq!(
            serde_json::to_value(speaker.to_external(None)).unwrap(),
            json!({"id": 2, "name": "Ada", "bio": null})
        );
        assert_eq!(
            serde_json::to_value(speaker.to_external(Some(&bio))).unwrap(),
            json!({
                "id": 2,
                "name": "Ada",
                "bio": {"id": 9, "bio_text": "Wrote the first program.", "speaker_id": 2}
            })
        );
    }

    #[test]
    fn display_matches_record_shape() {
        let session = sessions::Model {
            id: 4,
            title: "Panel".into(),
            start_time: Some(at(10, 0, 0)),
            event_id: 1,
        };
        assert_eq!(session.to_string(), "<Session 4, Panel, 2024-05-01 10:00:00>");

        let bio = bios::Model {
            id: 1,
            bio_text: "hi".into(),
            speaker_id: 1,
        };
        assert_eq!(bio.to_string(), "<Bio 1, hi>");
    }
}
