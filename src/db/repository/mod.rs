pub mod exame;
pub mod prontuario;

pub use exame::*;
pub use prontuario::*;
