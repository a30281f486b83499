pub mod compiler;
pub mod declarations;
pub mod decoder;
pub mod error;
pub mod header;
pub mod normalizer;
pub mod utils;
pub mod validator;

pub use compiler::{compile_tyson, parse_tyson, TysonCompiler, TysonOptions};
pub use error::TysonError;
pub use validator::UnknownFieldPolicy;
