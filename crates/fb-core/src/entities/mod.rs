//! Entity structs for feedback board domain objects.
//!
//! `FeedbackItem` maps to the `feedback` table in the record store. It derives
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and wire
//! schema validation.

mod feedback;

pub use feedback::{
    DESCRIPTION_MAX_CHARS, FeedbackItem, NewFeedback, TITLE_MAX_CHARS, check_description,
    check_title,
};
