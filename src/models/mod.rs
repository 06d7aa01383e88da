pub mod event;
pub mod event_button;
pub mod fix;
