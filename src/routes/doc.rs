use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{auth, bookings, invoices, requests as request_dto, rooms as room_dto, schedules},
    entity::enums,
    models::{
        BookedService, Booking, Customer, Invoice, Room, RoomPhoto, Service, ServiceRequest,
        ShiftSchedule, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth as auth_routes, bookings as booking_routes, health, requests, rooms},
    staging::StagedBooking,
    workflow::{booking::BookingAction, request::RequestAction},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth_routes::login,
        auth_routes::register,
        rooms::list_rooms,
        rooms::get_room,
        rooms::stage_booking,
        rooms::get_staged_booking,
        rooms::commit_booking,
        rooms::list_services,
        booking_routes::list_my_bookings,
        booking_routes::get_booking,
        booking_routes::cancel_booking,
        booking_routes::add_service,
        booking_routes::raise_request,
        requests::list_my_requests,
        admin::list_all_bookings,
        admin::booking_action,
        admin::list_requests,
        admin::request_action,
        admin::list_invoices,
        admin::pay_invoice,
        admin::list_schedules,
        admin::add_shift,
        admin::delete_shift
    ),
    components(
        schemas(
            User,
            Customer,
            Room,
            RoomPhoto,
            Service,
            Booking,
            BookedService,
            Invoice,
            ServiceRequest,
            ShiftSchedule,
            StagedBooking,
            BookingAction,
            RequestAction,
            enums::UserRole,
            enums::RoomType,
            enums::RoomStatus,
            enums::BookingStatus,
            enums::RequestCategory,
            enums::RequestStatus,
            enums::Shift,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::Registration,
            room_dto::RoomList,
            room_dto::RoomDetail,
            room_dto::ServiceList,
            bookings::StageBookingRequest,
            bookings::BookingList,
            bookings::BookingDetail,
            bookings::BookingActionRequest,
            bookings::BookingActionResult,
            bookings::AddServiceRequest,
            request_dto::CreateServiceRequest,
            request_dto::RequestActionRequest,
            request_dto::ServiceRequestList,
            invoices::InvoiceList,
            invoices::PayInvoiceRequest,
            schedules::CreateShiftRequest,
            schedules::ScheduleList,
            Meta,
            ApiResponse<room_dto::RoomList>,
            ApiResponse<bookings::BookingDetail>,
            ApiResponse<bookings::BookingList>,
            ApiResponse<ServiceRequest>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Rooms", description = "Room catalogue and add-on services"),
        (name = "Booking", description = "Two-phase booking: stage then commit"),
        (name = "Bookings", description = "Customer bookings"),
        (name = "Requests", description = "Guest service requests"),
        (name = "Front desk", description = "Staff and admin booking and request handling"),
        (name = "Admin", description = "Invoices"),
        (name = "Schedules", description = "Staff shift schedules"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
