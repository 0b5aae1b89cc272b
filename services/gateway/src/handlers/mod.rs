pub mod gold;
pub mod ratio;
pub mod silver;
