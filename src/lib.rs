pub mod bundled;
pub mod config;
pub mod constants;
pub mod controller;
pub mod messages;
pub mod playback;
