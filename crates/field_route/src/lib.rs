// field routing parser
//
// A version string is decoded into a record by a table of field descriptors.
// Each descriptor says what kind of value the field holds and which
// terminator bytes close it, and for each terminator which field is filled
// next.
//
// --- Example ---
//
// semver: MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]
//
//   index  name        kind     routes
//   0      major       numeric  '.' -> 1
//   1      minor       numeric  '.' -> 2
//   2      patch       numeric  '-' -> 3, '+' -> 4
//   3      prerelease  text     '+' -> 4
//   4      build       text
//
//   "2.3.19-pre.release+build"
//    | | |  |           |
//    0 1 2  3           4
//
// --- Rules ---
//
// 1. Scanning starts in field 0.
// 2. Bytes that are not a route of the active field belong to its segment.
// 3. A routed byte closes the segment and is consumed, the target field
//    becomes active.
// 4. The end of the input closes the active field.
// 5. Fields never reached are left alone.
//
// Tables are checked once when built (see FieldTable::new), scanning never
// has to deal with a dangling route.

mod grammar;
mod record;
mod scan;
mod table;

pub use grammar::{FieldSpec, Grammar};
pub use record::{DynamicRecord, Value};
pub use scan::{parse, FieldSink, FieldValue, ParseError};
pub use table::{ConfigError, FieldDescriptor, FieldKind, FieldTable};
