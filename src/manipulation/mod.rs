pub mod repositioner;
pub mod vacuum_manager;
