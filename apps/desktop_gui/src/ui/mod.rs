//! UI layer for the desktop GUI: app shell and panels.

pub mod app;

pub use app::DesktopGuiApp;
