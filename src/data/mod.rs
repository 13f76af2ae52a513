pub mod configuration;
pub mod dbconnector;
pub mod schema;
