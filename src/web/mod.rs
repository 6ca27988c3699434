pub mod dispatcher;
pub mod envelope;
pub mod middleware;
pub mod router;
pub mod routes;
