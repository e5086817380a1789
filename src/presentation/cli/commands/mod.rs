pub mod deploy;
pub mod load_key;
pub mod plan;
pub mod sync;
pub mod trigger;
pub mod validate;

pub use deploy::*;
pub use load_key::*;
pub use plan::*;
pub use sync::*;
pub use trigger::*;
pub use validate::*;
