pub mod config;
pub mod greeting;
pub mod registry;

pub use config::BindingConfig;
pub use greeting::{GreetingProvider, GREETING};
pub use registry::{Operation, OperationRegistry, GET_GREETING};
