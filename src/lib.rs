pub mod categories;
pub mod database;
pub mod handlers;
pub mod items;
pub mod messaging;
pub mod offers;
pub mod security;
pub mod transactions;
pub mod users;
