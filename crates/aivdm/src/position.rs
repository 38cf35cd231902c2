//! Typed class A position report (message types 1, 2 and 3).
//!
//! [PositionReport] holds engineering units (knots and degrees).
//! Absent values are `None` and map to the protocol's "not available" sentinels.

use std::collections::BTreeMap;

use crate::{
    bits::BitBuffer,
    catalog,
    errors::{DecodeError, EncodeError},
    pack::pack,
    record::{DecodedRecord, Value},
    sentence::sentences,
    unpack,
};

const LAT_LON_SCALE: f64 = 600_000.0;
const TENTHS: f64 = 10.0;

const TURN_NOT_AVAILABLE: i64 = -128;
const SPEED_NOT_AVAILABLE: u64 = 1023;
const LON_NOT_AVAILABLE: i64 = 0x6791AC0;
const LAT_NOT_AVAILABLE: i64 = 0x3412140;
const COURSE_NOT_AVAILABLE: u64 = 3600;
const HEADING_NOT_AVAILABLE: u64 = 511;

/// Time stamp value for "not available".
pub const SECOND_NOT_AVAILABLE: u8 = 60;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionReport {
    /// 1, 2 or 3.
    pub message_type: u8,
    pub repeat: u8,
    pub mmsi: u32,
    /// Navigation status code, 15 when undefined.
    pub status: u8,
    /// Raw rate-of-turn indicator.
    pub turn: Option<i8>,
    /// Knots.
    pub speed: Option<f64>,
    pub accuracy: bool,
    /// Degrees, east positive.
    pub lon: Option<f64>,
    /// Degrees, north positive.
    pub lat: Option<f64>,
    /// Degrees.
    pub course: Option<f64>,
    /// Degrees.
    pub heading: Option<u16>,
    /// UTC second, or 60-63 for the sentinel meanings.
    pub second: u8,
    pub maneuver: u8,
    pub raim: bool,
    /// SOTDMA communication state.
    pub sync_state: u8,
    pub slot_timeout: u8,
    pub slot_offset: u16,
}

impl Default for PositionReport {
    fn default() -> Self {
        Self {
            message_type: 1,
            repeat: 0,
            mmsi: 0,
            status: 15,
            turn: None,
            speed: None,
            accuracy: false,
            lon: None,
            lat: None,
            course: None,
            heading: None,
            second: SECOND_NOT_AVAILABLE,
            maneuver: 0,
            raim: false,
            sync_state: 0,
            slot_timeout: 0,
            slot_offset: 0,
        }
    }
}

impl PositionReport {
    /// Field values keyed by catalog name, scaled to their packed integers.
    ///
    /// A non-finite speed, position or course is an [EncodeError::InvalidValue].
    pub fn to_values(&self) -> Result<BTreeMap<String, Value>, EncodeError> {
        let radio = (u64::from(self.sync_state) << 17)
            | (u64::from(self.slot_timeout) << 14)
            | u64::from(self.slot_offset);
        let speed = scale(
            "speed",
            self.speed,
            TENTHS,
            Value::Unsigned(SPEED_NOT_AVAILABLE),
        )?;
        let lon = scale(
            "lon",
            self.lon,
            LAT_LON_SCALE,
            Value::Signed(LON_NOT_AVAILABLE),
        )?;
        let lat = scale(
            "lat",
            self.lat,
            LAT_LON_SCALE,
            Value::Signed(LAT_NOT_AVAILABLE),
        )?;
        let course = scale(
            "course",
            self.course,
            TENTHS,
            Value::Unsigned(COURSE_NOT_AVAILABLE),
        )?;

        let fields: [(&str, Value); 15] = [
            ("msgtype", Value::Unsigned(self.message_type.into())),
            ("repeat", Value::Unsigned(self.repeat.into())),
            ("mmsi", Value::Unsigned(self.mmsi.into())),
            ("status", Value::Unsigned(self.status.into())),
            (
                "turn",
                Value::Signed(self.turn.map_or(TURN_NOT_AVAILABLE, i64::from)),
            ),
            ("speed", speed),
            ("accuracy", Value::Unsigned(self.accuracy.into())),
            ("lon", lon),
            ("lat", lat),
            ("course", course),
            (
                "heading",
                Value::Unsigned(self.heading.map_or(HEADING_NOT_AVAILABLE, u64::from)),
            ),
            ("second", Value::Unsigned(self.second.into())),
            ("maneuver", Value::Unsigned(self.maneuver.into())),
            ("raim", Value::Unsigned(self.raim.into())),
            ("radio", Value::Unsigned(radio)),
        ];

        Ok(fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect())
    }

    /// Packs the report with the catalog schema.
    pub fn encode(&self) -> Result<BitBuffer, EncodeError> {
        pack(catalog::aivdm(), &self.to_values()?)
    }

    /// Encodes and frames the report as sentence lines.
    pub fn to_sentences(&self, channel: char) -> Result<Vec<String>, EncodeError> {
        let (payload, fill) = self.encode()?.to_armored();
        Ok(sentences(&payload, fill, channel, None))
    }

    /// Decodes an armored type 1-3 payload.
    pub fn decode(payload: &str) -> Result<Self, DecodeError> {
        let buffer = BitBuffer::from_armored(payload)?;
        let record = unpack::decode(&buffer, catalog::aivdm())?;
        PositionReport::try_from(&record)
    }
}

/// Reads a report from an unscaled record of type 1, 2 or 3.
impl TryFrom<&DecodedRecord> for PositionReport {
    type Error = DecodeError;

    fn try_from(record: &DecodedRecord) -> Result<Self, Self::Error> {
        let view = RecordView(record);

        let message_type = view.unsigned("msgtype")?;
        if !(1..=3).contains(&message_type) {
            return Err(DecodeError::Validation {
                field: "msgtype".to_string(),
                value: Value::Unsigned(message_type),
            });
        }

        let turn = view.signed("turn")?;
        let speed = view.unsigned("speed")?;
        let lon = view.signed("lon")?;
        let lat = view.signed("lat")?;
        let course = view.unsigned("course")?;
        let heading = view.unsigned("heading")?;
        let radio = view.unsigned("radio")?;

        Ok(PositionReport {
            message_type: message_type as u8,
            repeat: view.unsigned("repeat")? as u8,
            mmsi: view.unsigned("mmsi")? as u32,
            status: view.unsigned("status")? as u8,
            turn: (turn != TURN_NOT_AVAILABLE).then_some(turn as i8),
            speed: (speed != SPEED_NOT_AVAILABLE).then(|| speed as f64 / TENTHS),
            accuracy: view.unsigned("accuracy")? == 1,
            lon: (lon != LON_NOT_AVAILABLE).then(|| lon as f64 / LAT_LON_SCALE),
            lat: (lat != LAT_NOT_AVAILABLE).then(|| lat as f64 / LAT_LON_SCALE),
            course: (course != COURSE_NOT_AVAILABLE).then(|| course as f64 / TENTHS),
            heading: (heading != HEADING_NOT_AVAILABLE).then_some(heading as u16),
            second: view.unsigned("second")? as u8,
            maneuver: view.unsigned("maneuver")? as u8,
            raim: view.unsigned("raim")? == 1,
            sync_state: (radio >> 17) as u8 & 0x3,
            slot_timeout: (radio >> 14) as u8 & 0x7,
            slot_offset: (radio & 0x3FFF) as u16,
        })
    }
}

fn scale(
    field: &str,
    value: Option<f64>,
    factor: f64,
    not_available: Value,
) -> Result<Value, EncodeError> {
    match value {
        Some(v) if !v.is_finite() => Err(EncodeError::InvalidValue {
            field: field.to_string(),
            value: Value::Float(v),
        }),
        Some(v) => Ok(Value::Signed((v * factor).round() as i64)),
        None => Ok(not_available),
    }
}

struct RecordView<'a>(&'a DecodedRecord);

impl RecordView<'_> {
    fn value(&self, name: &str) -> Result<&Value, DecodeError> {
        self.0
            .get(name)
            .ok_or_else(|| DecodeError::MissingField(name.to_string()))
    }

    fn unsigned(&self, name: &str) -> Result<u64, DecodeError> {
        let value = self.value(name)?;
        value.as_u64().ok_or_else(|| DecodeError::Validation {
            field: name.to_string(),
            value: value.clone(),
        })
    }

    fn signed(&self, name: &str) -> Result<i64, DecodeError> {
        let value = self.value(name)?;
        value.as_i64().ok_or_else(|| DecodeError::Validation {
            field: name.to_string(),
            value: value.clone(),
        })
    }
}
