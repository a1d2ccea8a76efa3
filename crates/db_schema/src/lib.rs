pub mod enums;
pub mod impls;
pub mod newtypes;
pub mod source;
pub mod traits;
pub mod utils;
