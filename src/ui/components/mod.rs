// UI Components
pub mod command_bar;
pub mod dialog;
pub mod header;
pub mod login_form;
pub mod resource_table;
pub mod sidebar;
pub mod skeleton;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::{CommandBar, CommandItem};
pub use dialog::{Dialog, DialogKind};
pub use header::Header;
pub use login_form::{LoginField, LoginForm};
pub use resource_table::{ResourceTable, TableRow, TableView};
pub use sidebar::{Sidebar, SidebarItem};
pub use skeleton::Skeleton;
pub use status_bar::{MessageLevel, StatusBar};
pub use warning::WarningScreen;
