pub mod dns;
pub mod host;
pub mod zone;
