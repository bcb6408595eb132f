// Session history: generated messages the user chose to keep, held in memory
// for the process lifetime. Filtering and statistics are linear scans.

pub mod handlers;
pub mod store;
