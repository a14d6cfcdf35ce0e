pub(crate) mod app_state;
pub(crate) mod directory;
