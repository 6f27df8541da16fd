pub mod autocomplete;
pub mod content;
pub mod error;
pub mod interpreter;
pub mod mirror;
pub mod model;
pub mod paths;
pub mod registry;
pub mod session;
pub mod settings;
