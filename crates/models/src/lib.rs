pub mod concert;
pub mod db;
pub mod errors;
