//! Database entities module

pub mod appointment;
pub mod notification;
pub mod service;
pub mod setting;
pub mod user;
pub mod vehicle;
pub mod vehicle_type;

pub use appointment::Entity as Appointment;
pub use notification::Entity as Notification;
pub use service::Entity as Service;
pub use setting::Entity as Setting;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
pub use vehicle_type::Entity as VehicleType;
