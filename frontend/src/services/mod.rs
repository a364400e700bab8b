pub mod api;
pub mod logging;
pub mod session;
pub mod validation;
