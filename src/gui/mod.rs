mod app;
mod message;
mod widgets;

pub use app::{DefectScanApp, run};
pub use message::Message;
