//! Demo downstream handlers wrapped by the instrumentation middleware.

pub mod hello;
pub mod work;

pub use hello::HelloService;
pub use work::WorkService;
