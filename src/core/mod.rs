pub mod actions;
pub mod auth_gate;
pub mod route;
pub mod session;

pub use actions::{find_action, Action};
pub use auth_gate::{AuthGate, AuthState, GuardedArea};
pub use route::Route;
pub use session::Session;
