pub mod settings;

pub use settings::{MapperConfig, ReRegistration};
