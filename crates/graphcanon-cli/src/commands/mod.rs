pub mod digest;
pub mod events;
pub mod json;
pub mod pair;
