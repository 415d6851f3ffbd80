//! Business services sitting between route handlers and the backend client.

pub mod customers;
pub mod locations;
