pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod invite_popup;
pub mod loading_indicator;
pub mod popup;
pub mod screen_title;
pub mod text_input;
