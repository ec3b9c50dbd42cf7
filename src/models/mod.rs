//! Wire models for the laboratory backend.
//!
//! Every entity is mastered by the backend; these are transient copies. Field
//! names follow the backend's camelCase JSON.

pub mod booking;
pub mod lab;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingId, BookingInput};
pub use lab::{Lab, LabId, LabInput};
pub use room::{Room, RoomId, RoomInput};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserId};
