pub mod list_admins;
pub mod unlock_account;

pub use list_admins::list_admins;
pub use unlock_account::unlock_account;
