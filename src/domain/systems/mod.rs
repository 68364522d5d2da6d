pub mod helm;
pub mod propulsion;
