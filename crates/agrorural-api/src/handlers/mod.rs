//! API route handlers

pub mod auditoria;
pub mod culturas;
pub mod cultivos;
pub mod dashboard;
pub mod produtores;
pub mod propriedades;
pub mod safras;
