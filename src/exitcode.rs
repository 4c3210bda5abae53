//! Process exit codes, following BSD sysexits.h where a code fits

/// All requested work succeeded
pub const OK: i32 = 0;

/// Missing subcommand or contradictory arguments
pub const USAGE: i32 = 64;

/// Undecodable mesh codes on the command line, or unreadable CSV content
pub const DATAERR: i32 = 65;

/// Input CSV does not exist
pub const NOINPUT: i32 = 66;

/// GeoJSON serialization failed
pub const SOFTWARE: i32 = 70;

/// Reading input or writing output failed
pub const IOERR: i32 = 74;

/// Settings could not be loaded or failed validation
pub const CONFIG: i32 = 78;
