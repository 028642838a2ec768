pub mod app;
pub mod components;
pub mod events;
pub mod handlers;
pub mod ui;

pub use app::App;
pub use events::EventHandler;
pub use ui::draw;
