#[path = "scenario/numeric_range.rs"]
mod numeric_range;

#[path = "scenario/categorical_match.rs"]
mod categorical_match;

#[path = "scenario/interactive_session.rs"]
mod interactive_session;
