//! Vehicle aggregate

pub mod model;
pub mod repository;

pub use model::{NewVehicle, UpdateVehicleDto, Vehicle, VehicleWithOwner};
pub use repository::VehicleRepository;
