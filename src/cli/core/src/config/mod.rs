/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;


pub use loader::resolve_config;
pub use types::GigConfig;
