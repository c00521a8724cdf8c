pub mod remote;

pub mod clientes_repo;
pub use clientes_repo::ClientesRepository;
pub mod instalaciones_repo;
pub use instalaciones_repo::InstalacionesRepository;
pub mod mantenimientos_repo;
pub use mantenimientos_repo::MantenimientosRepository;
pub mod pendientes_repo;
pub use pendientes_repo::PendientesRepository;
pub mod presupuestos_repo;
pub use presupuestos_repo::PresupuestosRepository;
