pub mod agenda_service;
pub use agenda_service::AgendaService;
pub mod clientes_service;
pub use clientes_service::ClientesService;
pub mod instalaciones_service;
pub use instalaciones_service::InstalacionesService;
pub mod mantenimiento_service;
pub use mantenimiento_service::MantenimientoService;
