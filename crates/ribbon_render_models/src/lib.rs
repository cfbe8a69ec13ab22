pub mod messages;
pub mod surface;
pub mod trail;
