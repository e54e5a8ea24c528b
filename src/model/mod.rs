pub mod catalog;
pub mod game_save;
pub mod generation_request;
pub mod memory;
pub mod params;
pub mod session;
pub mod transcript;
