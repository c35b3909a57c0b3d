pub mod capabilities;
pub mod classifier;
pub mod converters;
pub mod errors;
pub mod models;
pub mod providers;
pub mod session;
