pub mod host;
pub mod ipv4;
pub mod ports;
pub mod subnet;
