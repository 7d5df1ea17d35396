pub mod address;
pub mod cart;
pub mod catalog;
pub mod errors;
pub mod money;
pub mod order;
pub mod ports;
pub mod shipping;
pub mod state;
