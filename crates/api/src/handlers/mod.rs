pub mod project_apply;
pub mod project_display;
