pub mod config_show;
pub mod doctor;
pub mod plan;
pub mod provision;
pub mod render;
