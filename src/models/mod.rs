pub mod answer;
pub mod notification;
pub mod question;
pub mod user;
pub mod vote;

pub use answer::*;
pub use notification::*;
pub use question::*;
pub use user::*;
pub use vote::*;
