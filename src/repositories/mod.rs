//! Repositorios
//!
//! Acceso a datos sobre PostgreSQL. Cada repositorio encapsula el SQL de
//! una tabla y aplica el scoping por usuario donde corresponde.

pub mod document_repository;
pub mod fuel_record_repository;
pub mod maintenance_repository;
pub mod profile_repository;
pub mod vehicle_repository;

pub use document_repository::DocumentRepository;
pub use fuel_record_repository::FuelRecordRepository;
pub use maintenance_repository::MaintenanceRepository;
pub use profile_repository::ProfileRepository;
pub use vehicle_repository::VehicleRepository;
