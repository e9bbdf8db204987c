pub mod config;
pub mod mask;
pub mod verify;
