pub mod check;
pub mod compiler;
pub mod config;
pub mod network;
pub mod show;
