pub mod inquiry;
pub mod local_store;
pub mod project;
pub mod settings;
