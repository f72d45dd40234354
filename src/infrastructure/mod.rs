pub mod backends;
pub mod clipboard;
pub mod stores;
