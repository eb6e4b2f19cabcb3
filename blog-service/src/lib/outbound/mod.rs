pub mod media;
pub mod preview;
pub mod repositories;
