pub mod connection;
pub mod contacts_repo;
pub mod messages_repo;
pub mod schema;
pub mod users_repo;
