mod config;
mod delivery;
