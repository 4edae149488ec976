pub mod random;
pub mod routes;
pub mod serialize;
pub mod units;
