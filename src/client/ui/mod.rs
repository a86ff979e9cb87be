mod overview;
mod question;
mod render;
mod trouble;

pub use render::render;
