//! Decoder for a foreign packed timestamp layout.
//!
//! Some runtimes store calendar timestamps as two machine words plus a zone
//! reference instead of exposing seconds directly:
//!
//! - `wall` (u64): bit 63 is a flag. When set, bits 30..=62 hold seconds
//!   since 1885-01-01 UTC (33 bits cover 1885..2157). Bits 0..=29 always hold
//!   the nanoseconds.
//! - `ext` (i64): when the flag is clear, seconds since 0001-01-01 UTC.
//! - `loc`: optional reference to a location whose `name` is an IANA zone
//!   name. Absent means UTC.
//!
//! [`PackedTime`] mirrors that layout so snapshots taken from such a runtime
//! can be portrayed. Decoding reads the words directly and never relies on
//! the owning runtime's conversion routines. The bit offsets are specific to
//! this one layout and must be re-derived for any other representation.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Set in `wall` when seconds are packed next to the nanoseconds.
pub const MONOTONIC_FLAG: u64 = 1 << 63;

const NANOS_BITS: u32 = 30;
const NANOS_MASK: u64 = (1 << NANOS_BITS) - 1;
const WALL_SECONDS_MASK: u64 = (1 << 33) - 1;

/// Seconds from 1885-01-01 to 1970-01-01.
pub const WALL_EPOCH_TO_UNIX: i64 = 2_682_288_000;
/// Seconds from 0001-01-01 to 1970-01-01.
pub const ABSOLUTE_EPOCH_TO_UNIX: i64 = 62_135_596_800;

/// Zone assumed when the packed value has none or its name is unknown.
pub const UTC_ZONE: &str = "UTC";
/// Zone name that refers to the host zone, see [`local_zone`].
pub const LOCAL_ZONE: &str = "Local";

/// Millisecond precision calendar format used when rendering timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// A zone reference as stored next to a packed timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The packed in-memory layout of a foreign timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedTime {
    pub wall: u64,
    pub ext: i64,
    pub loc: Option<Arc<Location>>,
}

/// Which half of the layout carries the seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Packing {
    /// Seconds since 1885 packed in `wall`.
    Monotonic,
    /// Seconds since year 1 in `ext`.
    Absolute,
}

impl PackedTime {
    /// Packs Unix seconds and nanoseconds into the foreign layout.
    ///
    /// Returns `None` when `nanos` is not below one second, or when
    /// [`Packing::Monotonic`] is requested for an instant outside the 33-bit
    /// range starting at 1885.
    pub fn encode(seconds: i64, nanos: u32, zone: Option<&str>, packing: Packing) -> Option<Self> {
        if nanos >= 1_000_000_000 {
            return None;
        }
        let loc = zone.map(|name| Arc::new(Location::new(name)));
        let nanos = u64::from(nanos);
        match packing {
            Packing::Monotonic => {
                let wall_seconds = u64::try_from(seconds.checked_add(WALL_EPOCH_TO_UNIX)?).ok()?;
                if wall_seconds > WALL_SECONDS_MASK {
                    return None;
                }
                Some(Self {
                    wall: MONOTONIC_FLAG | (wall_seconds << NANOS_BITS) | nanos,
                    ext: 0,
                    loc,
                })
            }
            Packing::Absolute => Some(Self {
                wall: nanos,
                ext: seconds.checked_add(ABSOLUTE_EPOCH_TO_UNIX)?,
                loc,
            }),
        }
    }

    pub fn packing(&self) -> Packing {
        if self.wall & MONOTONIC_FLAG != 0 {
            Packing::Monotonic
        } else {
            Packing::Absolute
        }
    }

    pub fn decode(&self) -> Decoded {
        decode(
            self.wall,
            self.ext,
            self.loc.as_deref().map(|loc| loc.name.as_str()),
        )
    }
}

/// Unix seconds, nanoseconds and zone name read out of a packed timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub seconds: i64,
    pub nanos: u32,
    pub zone: String,
}

/// Decodes the packed words without consulting the owning runtime.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn decode(wall: u64, ext: i64, zone: Option<&str>) -> Decoded {
    let seconds = if wall & MONOTONIC_FLAG != 0 {
        // 33 bits always fit in i64
        ((wall >> NANOS_BITS) & WALL_SECONDS_MASK) as i64 - WALL_EPOCH_TO_UNIX
    } else {
        ext.wrapping_sub(ABSOLUTE_EPOCH_TO_UNIX)
    };
    let zone = match zone {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => UTC_ZONE.to_owned(),
    };
    Decoded {
        seconds,
        nanos: (wall & NANOS_MASK) as u32,
        zone,
    }
}

impl Decoded {
    /// The decoded instant at its zone's offset.
    ///
    /// Unknown zone names resolve to UTC. Returns `None` only when the
    /// instant is outside the range `chrono` can represent.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)?;
        Some(utc.with_timezone(&zone_offset(&self.zone, &utc)))
    }

    /// Renders the instant with [`TIMESTAMP_FORMAT`].
    pub fn format(&self) -> Option<String> {
        self.to_datetime()
            .map(|datetime| datetime.format(TIMESTAMP_FORMAT).to_string())
    }
}

/// The host zone, resolved from its IANA name on first call and cached for
/// the life of the process.
///
/// `None` when the host does not report a zone name or the name is missing
/// from the compiled tz table; [`LOCAL_ZONE`] then renders as UTC.
pub fn local_zone() -> Option<Tz> {
    static HOST: OnceLock<Option<Tz>> = OnceLock::new();
    *HOST.get_or_init(|| {
        iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
    })
}

/// Looks up the offset in effect for `zone` at `at`.
///
/// Named zones come from the tz table compiled into the binary. The host
/// zone is read once by [`local_zone`], so lookups during traversal do no I/O.
fn zone_offset(zone: &str, at: &DateTime<Utc>) -> FixedOffset {
    let naive = at.naive_utc();
    let tz = match zone {
        UTC_ZONE => None,
        LOCAL_ZONE => local_zone(),
        name => name.parse::<Tz>().ok(),
    };
    tz.map_or_else(|| Utc.fix(), |tz| tz.offset_from_utc_datetime(&naive).fix())
}
