pub mod contacts;
pub mod http;
pub mod persistence;
