pub mod account;
pub mod announcement;

pub use account::{Account, AdminSummary, Role};
pub use announcement::Announcement;
