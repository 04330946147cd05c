pub mod types;
pub mod normalize;
pub mod categorize;
pub mod config;
pub mod data;
pub mod index;
pub mod visibility;
pub mod search;
pub mod session;
