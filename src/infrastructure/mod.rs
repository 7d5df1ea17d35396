pub mod catalog_repo;
pub mod models;
pub mod order_repo;
pub mod shipping_repo;
pub mod viacep;

#[cfg(test)]
pub(crate) mod test_db;
