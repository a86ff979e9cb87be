//! Wire records exchanged with the poll backend.
//!
//! All records are deserialized from JSON with camelCase keys. Fields
//! are optional across the board; a record never rejects a payload on
//! its own, it just keeps whatever arrived.

mod answer;
mod poll;
mod question;

pub use answer::Answer;
pub use poll::Poll;
pub use question::Question;
