pub mod ip;
pub mod zone;
