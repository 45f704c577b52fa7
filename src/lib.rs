pub mod android;
pub mod config;
pub mod error;
pub mod master;
pub mod plan;
pub mod processor;
pub mod resize;

pub use error::{FanOutError, RunAborted};
pub use master::{load_master, MasterImage};
pub use plan::{FanOutResult, FanOutRule, TargetSize};
pub use processor::{run_plan, run_plan_with, RunOptions};
pub use resize::resize_and_save;
