pub mod figure;
pub mod grid;
pub mod r2;
