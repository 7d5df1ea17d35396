pub mod catalog_service;
pub mod checkout;
pub mod order_service;
pub mod pricing;
pub mod shipping_service;
