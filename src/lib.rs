pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod surface;
pub mod timer;
