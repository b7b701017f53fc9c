pub mod config;
pub mod file_format;

pub use config::{
    CONFIG_FILE_NAME, StepwiseConfig, default_migration_filename_pattern, default_shell,
    default_state_file,
};
pub use file_format::FileFormat;
