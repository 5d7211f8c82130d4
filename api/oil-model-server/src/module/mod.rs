pub mod auth;
pub mod model_run;
pub mod shared;
pub mod system;
