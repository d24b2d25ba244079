mod completion_service;

pub use completion_service::*;
