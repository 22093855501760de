pub mod convert_controller;
pub mod health_controller;
pub mod page_controller;
