//! # aivdm
//!
//! Declarative decoding and encoding of AIS messages carried in AIVDM/AIVDO
//! sentences.
//!
//! A message layout is a [schema::Schema]: an ordered list of fixed-width fields,
//! spare regions and dispatch nodes that pick a sub-layout from an earlier field's
//! value. The [unpack] interpreter walks a schema over a [bits::BitBuffer] built
//! from the six-bit armored payload; [pack] walks it the other way. The built-in
//! [catalog] covers message types 1-22 and 24.
//!
//! ## Example
//!
//! ```
//! use aivdm::{record::Value, stream::MessageStream};
//!
//! let lines = ["!AIVDM,1,1,,B,177KQJ5000G?tO`K>RA1wUbN0TKH,0*5C"];
//! let record = MessageStream::ais(lines).next().unwrap().unwrap();
//! assert_eq!(record.get("mmsi"), Some(&Value::Unsigned(477553000)));
//! assert_eq!(record.get("heading"), Some(&Value::Unsigned(181)));
//! ```

pub mod bits;
pub mod catalog;
pub mod errors;
pub mod field;
pub mod fragment;
pub mod group;
pub mod pack;
pub mod position;
pub mod record;
pub mod schema;
pub mod sentence;
pub mod stream;
pub mod transform;
pub mod unpack;

#[cfg(feature = "serde")]
pub mod serde;
