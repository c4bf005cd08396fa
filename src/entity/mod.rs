pub mod booked_services;
pub mod bookings;
pub mod customers;
pub mod enums;
pub mod invoices;
pub mod room_photos;
pub mod rooms;
pub mod service_requests;
pub mod services;
pub mod shift_schedules;
pub mod staff;
pub mod users;

pub use booked_services::Entity as BookedServices;
pub use bookings::Entity as Bookings;
pub use customers::Entity as Customers;
pub use invoices::Entity as Invoices;
pub use room_photos::Entity as RoomPhotos;
pub use rooms::Entity as Rooms;
pub use service_requests::Entity as ServiceRequests;
pub use services::Entity as Services;
pub use shift_schedules::Entity as ShiftSchedules;
pub use staff::Entity as Staff;
pub use users::Entity as Users;
