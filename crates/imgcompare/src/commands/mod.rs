mod analyze;
mod compare;
mod init;
mod locate;

pub use self::analyze::analyze;
pub use self::compare::{CompareOutput, compare};
pub use self::init::init;
pub use self::locate::locate;
