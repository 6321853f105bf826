#[path = "property/determinism.rs"]
mod determinism;

#[path = "property/masks.rs"]
mod masks;

#[path = "property/f1_bounds.rs"]
mod f1_bounds;

#[path = "property/dedup.rs"]
mod dedup;

#[path = "property/resumability.rs"]
mod resumability;

#[path = "property/conjunctions.rs"]
mod conjunctions;
