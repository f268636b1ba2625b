//! Statistics over the passenger table. Everything here is a pure function
//! of the table; nothing is cached between calls.

pub mod correlation;
pub mod grouping;
pub mod stats;
pub mod summary;
