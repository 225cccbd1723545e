// Services layer for business logic
// Services own the mapping between storage rows and public types

pub mod event;

pub use event::EventService;
