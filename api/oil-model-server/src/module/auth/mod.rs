pub mod controller;
pub mod crud;
pub mod middleware;
pub mod route;
pub mod schema;
