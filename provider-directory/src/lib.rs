mod client;
mod fallback;
mod models;

pub use client::*;
pub use fallback::*;
pub use models::*;
