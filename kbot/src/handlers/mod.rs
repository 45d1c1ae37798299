//! Domain handlers: entity recognition, inline search, location search, the
//! language menu, and the built-in help commands. Each owns a slice of the
//! update space and declines everything else.

mod entity_hears;
mod help;
mod inline_search;
mod language_menu;
mod location_search;

pub use entity_hears::EntityHearsHandler;
pub use help::HelpHandler;
pub use inline_search::InlineSearchHandler;
pub use language_menu::LanguageMenuHandler;
pub use location_search::LocationSearchHandler;
