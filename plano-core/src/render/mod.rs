pub mod command;
pub mod plane;
pub mod surface;
