//! The AIVDM/AIVDO message catalog.
//!
//! [aivdm] is the top-level schema: message type, repeat indicator and MMSI, then a
//! dispatch on the message type into one of the per-type layouts below. Type 24
//! dispatches twice more, on its part number and then on the MMSI prefix.

use std::sync::LazyLock;

use crate::{
    field::{Field, Presenter, Validator},
    group::FieldGroup,
    record::Value,
    schema::{Dispatch, Instruction, Schema},
};

pub const NAVIGATION_STATUS: [&str; 16] = [
    "Under way using engine",
    "At anchor",
    "Not under command",
    "Restricted manoeuverability",
    "Constrained by her draught",
    "Moored",
    "Aground",
    "Engaged in fishing",
    "Under way sailing",
    "Reserved for HSC",
    "Reserved for WIG",
    "Reserved",
    "Reserved",
    "Reserved",
    "Reserved",
    "Not defined",
];

pub const EPFD_TYPE: [&str; 9] = [
    "Undefined",
    "GPS",
    "GLONASS",
    "Combined GPS/GLONASS",
    "Loran-C",
    "Chayka",
    "Integrated navigation system",
    "Surveyed",
    "Galileo",
];

pub const AID_TYPE: [&str; 32] = [
    "Unspecified",
    "Reference point",
    "RACON",
    "Fixed offshore structure",
    "Spare, Reserved for future use.",
    "Light, without sectors",
    "Light, with sectors",
    "Leading Light Front",
    "Leading Light Rear",
    "Beacon, Cardinal N",
    "Beacon, Cardinal E",
    "Beacon, Cardinal S",
    "Beacon, Cardinal W",
    "Beacon, Port hand",
    "Beacon, Starboard hand",
    "Beacon, Preferred Channel port hand",
    "Beacon, Preferred Channel starboard hand",
    "Beacon, Isolated danger",
    "Beacon, Safe water",
    "Beacon, Special mark",
    "Cardinal Mark N",
    "Cardinal Mark E",
    "Cardinal Mark S",
    "Cardinal Mark W",
    "Port hand Mark",
    "Starboard hand Mark",
    "Preferred Channel Port hand",
    "Preferred Channel Starboard hand",
    "Isolated danger",
    "Safe Water",
    "Special Mark",
    "Light Vessel / LANBY / Rigs",
];

/// Ship type labels, 0-99. Codes 1-19 are reserved; 20-99 follow a
/// category-then-hazard pattern.
pub fn ship_type_legends() -> Vec<String> {
    const HAZARD: [&str; 10] = [
        "all ships of this type",
        "Hazardous category A",
        "Hazardous category B",
        "Hazardous category C",
        "Hazardous category D",
        "Reserved for future use",
        "Reserved for future use",
        "Reserved for future use",
        "Reserved for future use",
        "No additional information",
    ];
    const SPECIAL_30: [&str; 10] = [
        "Fishing",
        "Towing",
        "Towing: length exceeds 200m or breadth exceeds 25m",
        "Dredging or underwater ops",
        "Diving ops",
        "Military ops",
        "Sailing",
        "Pleasure Craft",
        "Reserved",
        "Reserved",
    ];
    const SPECIAL_50: [&str; 10] = [
        "Pilot Vessel",
        "Search and Rescue vessel",
        "Tug",
        "Port Tender",
        "Anti-pollution equipment",
        "Law Enforcement",
        "Spare - Local Vessel",
        "Spare - Local Vessel",
        "Medical Transport",
        "Ship according to RR Resolution No. 18",
    ];

    let mut legends = Vec::with_capacity(100);
    legends.push("Not available".to_string());
    legends.extend((1..20).map(|_| "Reserved for future use".to_string()));

    for (decade, category) in [
        (2, "Wing in ground (WIG)"),
        (3, ""),
        (4, "High speed craft (HSC)"),
        (5, ""),
        (6, "Passenger"),
        (7, "Cargo"),
        (8, "Tanker"),
        (9, "Other Type"),
    ] {
        match decade {
            3 => legends.extend(SPECIAL_30.iter().map(|s| s.to_string())),
            5 => legends.extend(SPECIAL_50.iter().map(|s| s.to_string())),
            _ => legends.extend(HAZARD.iter().map(|h| format!("{category} - {h}"))),
        }
    }

    legends
}

// Presenters.

fn rate_of_turn(value: &Value) -> Value {
    match value.as_i64() {
        Some(-127) => Value::from("fastleft"),
        Some(127) => Value::from("fastright"),
        Some(n) => {
            let rate = (n as f64 / 4.733).powi(2);
            Value::Float(if n < 0 { -rate } else { rate })
        }
        None => value.clone(),
    }
}

fn lat_lon(value: &Value) -> Value {
    scaled(value, 600_000.0)
}

fn short_lat_lon(value: &Value) -> Value {
    scaled(value, 600.0)
}

fn tenths(value: &Value) -> Value {
    scaled(value, 10.0)
}

fn speed(value: &Value) -> Value {
    match value.as_u64() {
        Some(1022) => Value::from("fast"),
        _ => tenths(value),
    }
}

fn sar_speed(value: &Value) -> Value {
    match value.as_u64() {
        Some(1022) => Value::from("fast"),
        _ => value.clone(),
    }
}

fn altitude(value: &Value) -> Value {
    match value.as_u64() {
        Some(4094) => Value::from(">=4094"),
        _ => value.clone(),
    }
}

fn time_stamp(value: &Value) -> Value {
    match value.as_u64() {
        Some(60) => Value::from("n/a"),
        Some(61) => Value::from("manual input"),
        Some(62) => Value::from("dead reckoning"),
        Some(63) => Value::from("inoperative"),
        _ => value.clone(),
    }
}

fn scaled(value: &Value, divisor: f64) -> Value {
    value
        .as_f64()
        .map(|v| Value::Float(v / divisor))
        .unwrap_or_else(|| value.clone())
}

// Dispatch hooks.

fn message_type_defined(value: &Value) -> bool {
    value.as_u64().is_some_and(|n| (1..=24).contains(&n) && n != 23)
}

/// Part B of type 24 carries a mothership MMSI instead of dimensions when the
/// reporting MMSI starts with "98" (auxiliary craft).
fn auxiliary_craft(value: &Value) -> Option<usize> {
    value
        .as_u64()
        .map(|mmsi| usize::from(mmsi.to_string().starts_with("98")))
}

// Field groups.

/// Fixed-position field runs collapsed after decoding.
pub const FIELD_GROUPS: [FieldGroup; 2] = [
    // types 4 and 11
    FieldGroup {
        offset: 3,
        template: &["year", "month", "day", "hour", "minute", "second"],
        name: "time",
        legend: "Timestamp",
        combine: utc_timestamp,
    },
    // type 5
    FieldGroup {
        offset: 13,
        template: &["month", "day", "hour", "minute"],
        name: "eta",
        legend: "Estimated Time of Arrival",
        combine: eta,
    },
];

fn integers<const N: usize>(values: &[&Value]) -> Option<[u64; N]> {
    if values.len() != N {
        return None;
    }

    let mut out = [0u64; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.as_u64()?;
    }
    Some(out)
}

fn utc_timestamp(values: &[&Value]) -> Option<Value> {
    let [year, month, day, hour, minute, second] = integers::<6>(values)?;
    Some(Value::Text(format!(
        "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z"
    )))
}

fn eta(values: &[&Value]) -> Option<Value> {
    let [month, day, hour, minute] = integers::<4>(values)?;
    Some(Value::Text(format!(
        "{month:02}-{day:02}T{hour:02}:{minute:02}Z"
    )))
}

// Layouts.

struct Tables {
    status: Presenter,
    epfd: Presenter,
    ship_type: Presenter,
    aid_type: Presenter,
}

impl Tables {
    fn new() -> Self {
        Self {
            status: Presenter::legends(&NAVIGATION_STATUS),
            epfd: Presenter::legends(&EPFD_TYPE),
            ship_type: Presenter::Legends(ship_type_legends().into()),
            aid_type: Presenter::legends(&AID_TYPE),
        }
    }

    fn epfd(&self, legend: &str, out_of_band: Option<i64>) -> Instruction {
        let field = Field::unsigned("epfd", 4)
            .with_legend(legend)
            .with_range(0, 8)
            .with_legends(&self.epfd);
        match out_of_band {
            Some(v) => field.with_out_of_band(v).into(),
            None => field.into(),
        }
    }

    fn ship_type(&self) -> Instruction {
        Field::unsigned("shiptype", 8)
            .with_legend("Ship Type")
            .with_range(0, 99)
            .with_legends(&self.ship_type)
            .into()
    }
}

fn unsigned(name: &str, width: usize, legend: &str) -> Instruction {
    Field::unsigned(name, width).with_legend(legend).into()
}

fn text(name: &str, width: usize, legend: &str) -> Instruction {
    Field::text(name, width).with_legend(legend).into()
}

/// Date or time component with its "not available" value.
fn clock(name: &str, width: usize, out_of_band: i64, legend: &str) -> Instruction {
    Field::unsigned(name, width)
        .with_out_of_band(out_of_band)
        .with_legend(legend)
        .into()
}

fn spare(width: usize) -> Instruction {
    Instruction::Spare(width)
}

fn lon() -> Instruction {
    Field::signed("lon", 28)
        .with_out_of_band(0x6791AC0)
        .with_legend("Longitude")
        .present_with(lat_lon)
        .into()
}

fn lat() -> Instruction {
    Field::signed("lat", 27)
        .with_out_of_band(0x3412140)
        .with_legend("Latitude")
        .present_with(lat_lon)
        .into()
}

fn speed_over_ground() -> Instruction {
    Field::unsigned("speed", 10)
        .with_out_of_band(1023)
        .with_legend("Speed Over Ground")
        .present_with(speed)
        .into()
}

fn course() -> Instruction {
    Field::unsigned("course", 12)
        .with_out_of_band(0xE10)
        .with_legend("Course Over Ground")
        .present_with(tenths)
        .into()
}

fn heading() -> Instruction {
    Field::unsigned("heading", 9)
        .with_out_of_band(511)
        .with_legend("True Heading")
        .into()
}

fn second(out_of_band: Option<i64>) -> Instruction {
    let field = Field::unsigned("second", 6)
        .with_legend("Time Stamp")
        .present_with(time_stamp);
    match out_of_band {
        Some(v) => field.with_out_of_band(v).into(),
        None => field.into(),
    }
}

fn dimensions() -> [Instruction; 4] {
    [
        Field::unsigned("to_bow", 9)
            .with_out_of_band(0)
            .with_legend("Dimension to Bow")
            .into(),
        Field::unsigned("to_stern", 9)
            .with_out_of_band(0)
            .with_legend("Dimension to Stern")
            .into(),
        Field::unsigned("to_port", 6)
            .with_out_of_band(0)
            .with_legend("Dimension to Port")
            .into(),
        Field::unsigned("to_starboard", 6)
            .with_out_of_band(0)
            .with_legend("Dimension to Starboard")
            .into(),
    ]
}

fn mmsi(name: &str, legend: &str) -> Instruction {
    Field::unsigned(name, 30)
        .with_out_of_band(0)
        .with_legend(legend)
        .into()
}

/// Types 1, 2 and 3.
fn class_a_position(t: &Tables) -> Schema {
    Schema::new(vec![
        Field::unsigned("status", 4)
            .with_legend("Navigation Status")
            .with_legends(&t.status)
            .into(),
        Field::signed("turn", 8)
            .with_out_of_band(-128)
            .with_legend("Rate of Turn")
            .present_with(rate_of_turn)
            .into(),
        speed_over_ground(),
        unsigned("accuracy", 1, "Position Accuracy"),
        lon(),
        lat(),
        course(),
        heading(),
        second(None),
        unsigned("maneuver", 2, "Maneuver Indicator"),
        spare(3),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("radio", 19, "Radio status"),
    ])
}

/// Types 4 and 11.
fn base_station(t: &Tables) -> Schema {
    Schema::new(vec![
        clock("year", 14, 0, "Year"),
        clock("month", 4, 0, "Month"),
        clock("day", 5, 0, "Day"),
        clock("hour", 5, 24, "Hour"),
        clock("minute", 6, 60, "Minute"),
        clock("second", 6, 60, "Second"),
        unsigned("accuracy", 1, "Fix quality"),
        lon(),
        lat(),
        t.epfd("Type of EPFD", None),
        spare(10),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("radio", 19, "SOTDMA state"),
    ])
}

/// Type 5.
fn static_voyage(t: &Tables) -> Schema {
    let mut instructions = vec![
        unsigned("ais_version", 2, "AIS Version"),
        Field::unsigned("imo_id", 30)
            .with_out_of_band(0)
            .with_legend("IMO Identification Number")
            .into(),
        text("callsign", 42, "Call Sign"),
        text("shipname", 120, "Vessel Name"),
        t.ship_type(),
    ];
    instructions.extend(dimensions());
    instructions.extend([
        t.epfd("Position Fix Type", Some(0)),
        clock("month", 4, 0, "ETA month"),
        clock("day", 5, 0, "ETA day"),
        clock("hour", 5, 24, "ETA hour"),
        clock("minute", 6, 60, "ETA minute"),
        Field::unsigned("draught", 8)
            .with_out_of_band(0)
            .with_legend("Draught")
            .present_with(tenths)
            .into(),
        text("destination", 120, "Destination"),
        unsigned("dte", 1, "DTE"),
        spare(1),
    ]);
    Schema::new(instructions)
}

/// Type 6.
fn addressed_binary() -> Schema {
    Schema::new(vec![
        unsigned("seqno", 2, "Sequence Number"),
        unsigned("dest_mmsi", 30, "Destination MMSI"),
        unsigned("retransmit", 1, "Retransmit flag"),
        spare(1),
        Field::unsigned("application_id", 16)
            .with_out_of_band(0)
            .with_legend("Application ID")
            .into(),
        Field::raw("data", 920).with_legend("Data").into(),
    ])
}

/// Types 7 and 13.
fn acknowledge() -> Schema {
    Schema::new(vec![
        spare(2),
        mmsi("mmsi1", "MMSI number 1"),
        spare(2),
        mmsi("mmsi2", "MMSI number 2"),
        spare(2),
        mmsi("mmsi3", "MMSI number 3"),
        spare(2),
        mmsi("mmsi4", "MMSI number 4"),
        spare(2),
    ])
}

/// Type 8.
fn broadcast_binary() -> Schema {
    Schema::new(vec![
        spare(2),
        Field::unsigned("application_id", 16)
            .with_out_of_band(0)
            .with_legend("Application ID")
            .into(),
        Field::raw("data", 952).with_legend("Data").into(),
    ])
}

/// Type 9.
fn sar_aircraft() -> Schema {
    Schema::new(vec![
        Field::unsigned("alt", 12)
            .with_out_of_band(4095)
            .with_legend("Altitude")
            .present_with(altitude)
            .into(),
        Field::unsigned("speed", 10)
            .with_out_of_band(1023)
            .with_legend("SOG")
            .present_with(sar_speed)
            .into(),
        unsigned("accuracy", 1, "Position Accuracy"),
        lon(),
        lat(),
        course(),
        second(Some(60)),
        unsigned("regional", 8, "Regional reserved"),
        unsigned("dte", 1, "DTE"),
        spare(3),
        unsigned("assigned", 1, "Assigned"),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("radio", 20, "Radio status"),
    ])
}

/// Type 10.
fn utc_inquiry() -> Schema {
    Schema::new(vec![
        spare(2),
        unsigned("dest_mmsi", 30, "Destination MMSI"),
        spare(2),
    ])
}

/// Type 12.
fn addressed_safety() -> Schema {
    Schema::new(vec![
        unsigned("seqno", 2, "Sequence Number"),
        unsigned("dest_mmsi", 30, "Destination MMSI"),
        unsigned("retransmit", 1, "Retransmit flag"),
        spare(1),
        text("text", 936, "Text"),
    ])
}

/// Type 14. The text is trimmed to a whole number of characters.
fn broadcast_safety() -> Schema {
    Schema::new(vec![spare(2), text("text", 966, "Text")])
}

/// Type 15.
fn interrogation() -> Schema {
    Schema::new(vec![
        spare(2),
        mmsi("mmsi1", "Interrogated MMSI"),
        unsigned("type1_1", 6, "First message type"),
        unsigned("offset1_1", 12, "First slot offset"),
        spare(2),
        unsigned("type1_2", 6, "Second message type"),
        unsigned("offset1_2", 12, "Second slot offset"),
        spare(2),
        mmsi("mmsi2", "Interrogated MMSI"),
        unsigned("type2_1", 6, "First message type"),
        unsigned("offset2_1", 12, "First slot offset"),
        spare(2),
    ])
}

/// Type 16.
fn assignment() -> Schema {
    Schema::new(vec![
        spare(2),
        mmsi("mmsi1", "Destination MMSI"),
        unsigned("offset1", 12, "First slot offset"),
        unsigned("increment1", 10, "Slot increment"),
        spare(2),
        mmsi("mmsi2", "Destination MMSI"),
        unsigned("offset2", 12, "Second slot offset"),
        unsigned("increment2", 10, "Slot increment"),
        spare(2),
    ])
}

/// Type 17.
fn dgnss() -> Schema {
    Schema::new(vec![
        spare(2),
        Field::signed("lon", 18)
            .with_out_of_band(0x1A838)
            .with_legend("Longitude")
            .present_with(short_lat_lon)
            .into(),
        Field::signed("lat", 17)
            .with_out_of_band(0xD548)
            .with_legend("Latitude")
            .present_with(short_lat_lon)
            .into(),
        spare(2),
        Field::raw("data", 736).with_legend("DGNSS data").into(),
    ])
}

/// Type 18.
fn class_b_position() -> Schema {
    Schema::new(vec![
        unsigned("reserved", 8, "Regional reserved"),
        speed_over_ground(),
        unsigned("accuracy", 1, "Position Accuracy"),
        lon(),
        lat(),
        course(),
        heading(),
        second(None),
        unsigned("regional", 2, "Regional reserved"),
        unsigned("cs", 1, "CS Unit"),
        unsigned("display", 1, "Display flag"),
        unsigned("dsc", 1, "DSC flag"),
        unsigned("band", 1, "Band flag"),
        unsigned("msg22", 1, "Message 22 flag"),
        unsigned("assigned", 1, "Assigned"),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("radio", 20, "Radio status"),
    ])
}

/// Type 19.
fn class_b_extended(t: &Tables) -> Schema {
    let mut instructions = vec![
        unsigned("reserved", 8, "Regional reserved"),
        speed_over_ground(),
        unsigned("accuracy", 1, "Position Accuracy"),
        lon(),
        lat(),
        course(),
        heading(),
        second(None),
        unsigned("regional", 4, "Regional reserved"),
        text("shipname", 120, "Vessel Name"),
        t.ship_type(),
    ];
    instructions.extend(dimensions());
    instructions.extend([
        t.epfd("Position Fix Type", Some(0)),
        unsigned("assigned", 1, "Assigned"),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("radio", 20, "Radio status"),
    ]);
    Schema::new(instructions)
}

/// Type 20.
fn data_link_management() -> Schema {
    let mut instructions = vec![spare(2)];
    for i in 1..=4 {
        instructions.extend([
            unsigned(&format!("offset{i}"), 12, &format!("Offset number {i}")),
            unsigned(&format!("number{i}"), 4, "Reserved slots"),
            unsigned(&format!("timeout{i}"), 3, "Time-out"),
            unsigned(&format!("increment{i}"), 11, "Increment"),
        ]);
    }
    Schema::new(instructions)
}

/// Type 21. The second `name` field is the name extension.
fn aid_to_navigation(t: &Tables) -> Schema {
    let mut instructions = vec![
        Field::unsigned("type", 5)
            .with_out_of_band(0)
            .with_legend("Aid type")
            .with_legends(&t.aid_type)
            .into(),
        text("name", 120, "Name"),
        unsigned("accuracy", 1, "Position Accuracy"),
        lon(),
        lat(),
    ];
    instructions.extend(dimensions());
    instructions.extend([
        t.epfd("Position Fix Type", Some(0)),
        Field::unsigned("second", 6)
            .with_out_of_band(0)
            .with_legend("UTC Second")
            .into(),
        unsigned("off_position", 1, "Off-Position Indicator"),
        unsigned("regional", 8, "Regional reserved"),
        unsigned("raim", 1, "RAIM flag"),
        unsigned("virtual_aid", 1, "Virtual-aid flag"),
        unsigned("assigned", 1, "Assigned-mode flag"),
        spare(2),
        text("name", 84, "Name Extension"),
    ]);
    Schema::new(instructions)
}

/// Type 22.
fn channel_management() -> Schema {
    let corner = |name: &str, width: usize, out_of_band: i64, legend: &str| -> Instruction {
        Field::signed(name, width)
            .with_out_of_band(out_of_band)
            .with_legend(legend)
            .present_with(short_lat_lon)
            .into()
    };

    Schema::new(vec![
        spare(2),
        unsigned("channel_a", 12, "Channel A"),
        unsigned("channel_b", 12, "Channel B"),
        unsigned("mode", 4, "Tx/Rx mode"),
        unsigned("power", 1, "Power"),
        corner("ne_lon", 18, 0x1A838, "NE Longitude"),
        corner("ne_lat", 17, 0xD548, "NE Latitude"),
        corner("sw_lon", 18, 0x1A838, "SW Longitude"),
        corner("sw_lat", 17, 0xD548, "SW Latitude"),
        unsigned("addressed", 1, "Addressed"),
        unsigned("band_a", 1, "Channel A Band"),
        unsigned("band_b", 1, "Channel B Band"),
        unsigned("zonesize", 3, "Zone size"),
        spare(23),
    ])
}

/// Type 24: part A carries the name, part B the type, vendor and either
/// dimensions or a mothership MMSI.
fn static_data_report(t: &Tables) -> Schema {
    let part_a = Schema::new(vec![text("shipname", 120, "Vessel Name"), spare(8)]);

    let mut dimensions_b = vec![text("callsign", 42, "Call Sign")];
    dimensions_b.extend(dimensions());
    dimensions_b.push(spare(8));

    let mothership = Schema::new(vec![mmsi("mothership_mmsi", "Mothership MMSI"), spare(8)]);

    let part_b = Schema::new(vec![
        t.ship_type(),
        text("vendorid", 42, "Vendor ID"),
        Dispatch::new("mmsi", vec![Some(Schema::new(dimensions_b)), Some(mothership)])
            .with_compute(auxiliary_craft)
            .into(),
    ]);

    Schema::new(vec![
        unsigned("partno", 2, "Part Number"),
        Dispatch::new("partno", vec![Some(part_a), Some(part_b)]).into(),
    ])
}

fn build() -> Schema {
    let t = Tables::new();

    let subtypes = vec![
        None,
        Some(class_a_position(&t)),
        Some(class_a_position(&t)),
        Some(class_a_position(&t)),
        Some(base_station(&t)),
        Some(static_voyage(&t)),
        Some(addressed_binary()),
        Some(acknowledge()),
        Some(broadcast_binary()),
        Some(sar_aircraft()),
        Some(utc_inquiry()),
        Some(base_station(&t)),
        Some(addressed_safety()),
        Some(acknowledge()),
        Some(broadcast_safety()),
        Some(interrogation()),
        Some(assignment()),
        Some(dgnss()),
        Some(class_b_position()),
        Some(class_b_extended(&t)),
        Some(data_link_management()),
        Some(aid_to_navigation(&t)),
        Some(channel_management()),
        None,
        Some(static_data_report(&t)),
    ];

    Schema::new(vec![
        Field::unsigned("msgtype", 6)
            .with_out_of_band(0)
            .with_legend("Message Type")
            .with_validator(Validator::Predicate(message_type_defined))
            .into(),
        unsigned("repeat", 2, "Repeat Indicator"),
        mmsi("mmsi", "MMSI"),
        Dispatch::new("msgtype", subtypes).into(),
    ])
}

static AIVDM: LazyLock<Schema> = LazyLock::new(build);

/// The top-level AIVDM/AIVDO schema. Built on first use.
pub fn aivdm() -> &'static Schema {
    &AIVDM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bits::BitBuffer, unpack::decode};

    fn layout_width(schema: &Schema) -> usize {
        schema
            .instructions()
            .iter()
            .map(|i| match i {
                Instruction::Field(f) => f.width,
                Instruction::Spare(w) => *w,
                Instruction::Dispatch(_) => 0,
            })
            .sum()
    }

    #[test]
    fn test_catalog_compiles() {
        aivdm().validate().unwrap();
    }

    #[test]
    fn test_message_widths() {
        let t = Tables::new();
        assert_eq!(layout_width(&class_a_position(&t)), 168 - 38);
        assert_eq!(layout_width(&base_station(&t)), 168 - 38);
        assert_eq!(layout_width(&static_voyage(&t)), 424 - 38);
        assert_eq!(layout_width(&sar_aircraft()), 168 - 38);
        assert_eq!(layout_width(&utc_inquiry()), 72 - 38);
        assert_eq!(layout_width(&acknowledge()), 168 - 38);
        assert_eq!(layout_width(&interrogation()), 160 - 38);
        assert_eq!(layout_width(&assignment()), 148 - 38);
        assert_eq!(layout_width(&class_b_position()), 168 - 38);
        assert_eq!(layout_width(&class_b_extended(&t)), 327 - 38);
        assert_eq!(layout_width(&data_link_management()), 160 - 38);
        assert_eq!(layout_width(&channel_management()), 168 - 38);
        assert_eq!(layout_width(&aid_to_navigation(&t)), 357 - 38);
    }

    #[test]
    fn test_ship_type_legends() {
        let legends = ship_type_legends();
        assert_eq!(legends.len(), 100);
        assert_eq!(legends[0], "Not available");
        assert_eq!(legends[19], "Reserved for future use");
        assert_eq!(legends[20], "Wing in ground (WIG) - all ships of this type");
        assert_eq!(legends[30], "Fishing");
        assert_eq!(legends[52], "Tug");
        assert_eq!(legends[70], "Cargo - all ships of this type");
        assert_eq!(legends[89], "Tanker - No additional information");
        assert_eq!(legends[99], "Other Type - No additional information");
    }

    #[test]
    fn test_message_type_validator() {
        assert!(!message_type_defined(&Value::Unsigned(0)));
        assert!(message_type_defined(&Value::Unsigned(1)));
        assert!(!message_type_defined(&Value::Unsigned(23)));
        assert!(message_type_defined(&Value::Unsigned(24)));
        assert!(!message_type_defined(&Value::Unsigned(25)));
    }

    #[test]
    fn test_auxiliary_craft() {
        assert_eq!(auxiliary_craft(&Value::Unsigned(982_123_456)), Some(1));
        assert_eq!(auxiliary_craft(&Value::Unsigned(271_041_815)), Some(0));
    }

    #[test]
    fn test_rate_of_turn_presenter() {
        assert_eq!(rate_of_turn(&Value::Signed(127)), Value::from("fastright"));
        assert_eq!(rate_of_turn(&Value::Signed(-127)), Value::from("fastleft"));
        assert_eq!(rate_of_turn(&Value::Signed(0)), Value::Float(0.0));
        let Value::Float(left) = rate_of_turn(&Value::Signed(-10)) else {
            panic!("expected a float");
        };
        assert!(left < 0.0);
    }

    #[test]
    fn test_timestamp_group() {
        let values = [2009u64, 5, 12, 9, 4, 30].map(Value::Unsigned);
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(
            utc_timestamp(&refs),
            Some(Value::from("2009-05-12T09:04:30Z"))
        );
        assert_eq!(utc_timestamp(&refs[..5]), None);
    }

    #[test]
    fn test_decode_position_report() {
        let buffer = BitBuffer::from_armored("177KQJ5000G?tO`K>RA1wUbN0TKH").unwrap();
        let record = decode(&buffer, aivdm()).unwrap();

        assert_eq!(record.get("msgtype"), Some(&Value::Unsigned(1)));
        assert_eq!(record.get("mmsi"), Some(&Value::Unsigned(477553000)));
        assert_eq!(record.get("status"), Some(&Value::Unsigned(5)));
        assert_eq!(record.get("turn"), Some(&Value::Signed(0)));
        assert_eq!(record.get("lon"), Some(&Value::Signed(-73407500)));
        assert_eq!(record.get("lat"), Some(&Value::Signed(28549700)));
        assert_eq!(record.get("course"), Some(&Value::Unsigned(510)));
        assert_eq!(record.get("heading"), Some(&Value::Unsigned(181)));
        assert_eq!(record.get("second"), Some(&Value::Unsigned(15)));
        assert_eq!(record.get("radio"), Some(&Value::Unsigned(149208)));
        assert_eq!(record.len(), 15);
    }

    #[test]
    fn test_decode_type_24_part_b() {
        let buffer = BitBuffer::from_armored("H42O55lti4hhhilD3nink000?050").unwrap();
        let record = decode(&buffer, aivdm()).unwrap();

        assert_eq!(
            record.names().collect::<Vec<_>>(),
            vec![
                "msgtype", "repeat", "mmsi", "partno", "shiptype", "vendorid", "callsign",
                "to_bow", "to_stern", "to_port", "to_starboard"
            ]
        );
        assert_eq!(record.get("shiptype"), Some(&Value::Unsigned(60)));
        assert_eq!(record.get("vendorid"), Some(&Value::from("1D00014")));
        assert_eq!(record.get("callsign"), Some(&Value::from("TC6163")));
        assert_eq!(record.get("to_stern"), Some(&Value::Unsigned(15)));
        assert_eq!(record.get("to_starboard"), Some(&Value::Unsigned(5)));
    }
}
