pub mod admin_users;
pub mod customers;
pub mod health;
pub mod me;
pub mod payments;
pub mod products;
pub mod suppliers;
