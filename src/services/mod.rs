pub mod providers;
pub mod rotation;
pub mod search;
