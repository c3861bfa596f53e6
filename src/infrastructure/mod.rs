//! Platform locations for configuration, session and trace files.

pub mod paths;

pub use paths::{
    config_file_path, default_data_dir, default_export_dir, expand_tilde, session_file_path,
};
