//! Player domain model
//!
//! A player carries identity, biographical and ranking fields plus the
//! bookkeeping the repository maintains (timestamps, soft-delete flag).

mod handedness;
mod model;

pub use handedness::Handedness;
pub use model::{
    format_date_time, now, parse_date, parse_date_time, Player, DATE_FORMAT, DATE_TIME_FORMAT,
    UNASSIGNED_ID,
};
