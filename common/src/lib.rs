pub mod dtos;
pub mod util;
