mod polls;
pub use polls::Polls;

mod users;
pub use users::Users;
