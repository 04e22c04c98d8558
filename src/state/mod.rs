pub mod navigation;
pub mod resolver;
pub mod ui;

pub use navigation::{Category, InstallTopic, NavigationState, SubPage};
pub use resolver::{resolve, ContentBlock};
pub use ui::UIState;
