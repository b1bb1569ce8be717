pub mod control;
pub mod ring;
