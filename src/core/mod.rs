pub mod anchor;
pub mod balance;
pub mod canonical;
pub mod checkpoint;
pub mod constants;
pub mod errors;
pub mod models;
pub mod privacy;
pub mod services;
pub mod snapshot;
