pub mod down;
pub mod init;
pub mod log;
pub mod migrate;
pub mod new;
pub mod status;
pub mod up;

pub use down::cmd_down;
pub use init::cmd_init;
pub use log::cmd_log;
pub use migrate::cmd_migrate;
pub use new::cmd_new;
pub use status::cmd_status;
pub use up::cmd_up;
