pub mod diagnostico;
pub mod exames;
pub mod health;
pub mod prontuarios;
