pub mod app;
pub mod catch;
pub mod effects;
pub mod finale;
pub mod gate;
pub mod matching;
pub mod opening;
pub mod puzzle;

pub use app::App;
