pub mod file_ops;
pub mod launch;

pub use file_ops::open_externally;
pub use launch::launch_app;
