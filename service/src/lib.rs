pub mod consts;
pub mod error;
pub mod profile;
pub mod render;
pub mod routes;
pub mod settings;
pub mod state;
