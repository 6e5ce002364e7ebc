pub use board::*;
pub use clock::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use screen::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod clock;
mod config;
mod engine;
mod errors;
mod screen;
mod visualization;
