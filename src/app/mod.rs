pub mod dispatch;

pub use dispatch::{dispatch, run_export, run_tag};
