//! SQL implementations of the record store on [`crate::FeedbackDb`].

pub mod feedback;
