pub mod connect;
pub mod info;
pub mod media;
pub mod screen;
