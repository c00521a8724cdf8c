pub mod agenda;
pub mod clientes;
pub mod instalaciones;
pub mod mantenimientos;
pub mod pendientes;
pub mod presupuestos;
pub mod usuarios;
