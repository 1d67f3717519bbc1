pub mod matrix;
pub mod ordered_set;
pub mod params;
pub mod poly;
