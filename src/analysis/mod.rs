pub mod axis;
pub mod vacuum;
