pub mod routes;
pub mod startup;
pub mod state;
pub mod errors;
pub mod request_log;

pub use startup::run;
