pub mod zone;

pub use zone::OutputZone;
