mod meta;
pub use self::meta::{Ack, DataResponse, ListResponse};

mod booking;
pub use self::booking::{
    AvailabilityRule, Booking, BookingID, BookingStatus, BookingStatusUpdate, EventType,
    EventTypeID, EventTypeInput,
};

mod content;
pub use self::content::{ContactMessage, DashboardStats, Post, PostInput, Project};
