//! Live call session: shared manager plus the HTTP/WebSocket surface.

pub mod manager;
pub mod model;
pub mod ws;

pub use manager::SessionManager;
pub use model::{Applied, SessionSnapshot, WizardAction, WsMessage};
pub use ws::{SessionRouteState, session_routes};
