//! Timestamp rendering through `portray`.
//!
//! Packed timestamps are decoded from their raw words, rendered in their
//! recorded zone, and walked field by field when known types are ignored.

use std::time::{Duration, SystemTime};

use chrono::{DateTime, NaiveDate, Utc};
use depict::{
    portray,
    timestamp::{local_zone, Packing, LOCAL_ZONE, TIMESTAMP_FORMAT},
    Depict, Design, PackedTime,
};

#[derive(Depict)]
struct Event {
    name: &'static str,
    at: PackedTime,
}

fn instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2021, 3, 14)
        .and_then(|date| date.and_hms_nano_opt(15, 9, 26, 535_897_932))
        .map(|naive| naive.and_utc())
        .unwrap()
}

fn packed(zone: Option<&str>, packing: Packing) -> PackedTime {
    let at = instant();
    PackedTime::encode(at.timestamp(), at.timestamp_subsec_nanos(), zone, packing).unwrap()
}

#[test]
fn both_packings_render_the_same_instant() {
    for packing in [Packing::Monotonic, Packing::Absolute] {
        let event = Event {
            name: "deploy",
            at: packed(None, packing),
        };
        assert_eq!(
            portray(&event).to_json().unwrap(),
            r#"{"name":"deploy","at":"2021-03-14T15:09:26.535+0000"}"#
        );
    }
}

#[test]
fn rendering_matches_chrono_in_the_recorded_zone() {
    for zone in ["Asia/Tokyo", "America/New_York", "Europe/London"] {
        let tz: chrono_tz::Tz = zone.parse().unwrap();
        let expected = instant().with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string();

        let depiction = portray(&packed(Some(zone), Packing::Absolute));
        assert_eq!(depiction.to_json().unwrap(), format!("\"{expected}\""));
    }
}

#[test]
fn local_zone_renders_in_the_host_zone() {
    let expected = match local_zone() {
        Some(tz) => instant().with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        None => instant().format(TIMESTAMP_FORMAT).to_string(),
    };
    for packing in [Packing::Monotonic, Packing::Absolute] {
        let depiction = portray(&packed(Some(LOCAL_ZONE), packing));
        assert_eq!(depiction.to_json().unwrap(), format!("\"{expected}\""));
    }
}

#[test]
fn non_utc_zone_shifts_the_calendar_date() {
    let depiction = portray(&packed(Some("Asia/Tokyo"), Packing::Monotonic));
    assert_eq!(
        depiction.to_json().unwrap(),
        r#""2021-03-15T00:09:26.535+0900""#
    );
}

#[test]
fn known_types_can_be_walked_as_records() {
    let time = packed(Some("Asia/Tokyo"), Packing::Absolute);
    let design = Design::new().ignore_known_types();
    let expected = format!(
        r#"{{"wall":{},"ext":{},"loc":{{"name":"Asia/Tokyo"}}}}"#,
        time.wall, time.ext
    );
    assert_eq!(design.portray(&time).to_json().unwrap(), expected);

    let design = Design::new().ignore_known_types().include(["at.ext"]);
    let event = Event {
        name: "deploy",
        at: packed(None, Packing::Absolute),
    };
    assert_eq!(
        design.portray(&event).to_json().unwrap(),
        format!(r#"{{"at":{{"ext":{}}}}}"#, event.at.ext)
    );
}

#[test]
fn timestamps_truncate_like_records() {
    let event = Event {
        name: "deploy",
        at: packed(None, Packing::Monotonic),
    };
    let design = Design::new().with_max_depth(1);
    assert_eq!(
        design.portray(&event).to_json().unwrap(),
        r#"{"name":"...","at":"{...}"}"#
    );
}

#[test]
fn chrono_and_system_times_use_the_same_format() {
    #[derive(Depict)]
    struct Stamps {
        chrono: DateTime<Utc>,
        system: SystemTime,
        elapsed: Duration,
    }

    let stamps = Stamps {
        chrono: instant(),
        system: SystemTime::UNIX_EPOCH + Duration::from_millis(1_500),
        elapsed: Duration::from_micros(3),
    };
    assert_eq!(
        portray(&stamps).to_json().unwrap(),
        r#"{"chrono":"2021-03-14T15:09:26.535+0000","system":"1970-01-01T00:00:01.500+0000","elapsed":3000}"#
    );
}
