mod build;
mod config;
mod products;
mod workflows;

pub use self::build::build;
pub use self::config::config;
pub use self::products::products;
pub use self::workflows::workflows;
