pub mod message;
pub mod models;
pub mod ports;
pub mod sender_date;
pub mod service;
pub mod url;
