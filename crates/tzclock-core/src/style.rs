mod card;
mod theme;

pub use card::{banner_text_style, card_container_style};
pub use theme::{FacePalette, tzclock_theme};
