// UI Layer
pub mod components;
pub mod context;
pub mod i18n;
pub mod layout;
pub mod theme;

pub use context::UiContext;
pub use i18n::{resolve, I18n, Language};
pub use layout::{LayoutAreas, LayoutManager, LayoutMode, MIN_HEIGHT, MIN_WIDTH};
pub use theme::{ColorDef, Theme, ThemeController, ThemeMode};

pub use components::{
    CommandBar, CommandItem, Dialog, DialogKind, Header, LoginField, LoginForm, MessageLevel,
    ResourceTable, Sidebar, SidebarItem, Skeleton, StatusBar, TableRow, TableView, WarningScreen,
};
