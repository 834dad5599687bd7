pub mod locations;
pub mod roll;
