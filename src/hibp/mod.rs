pub mod client;
pub mod models;
pub mod outcome;
pub mod patterns;
