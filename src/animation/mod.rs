/// Named easing curves.
pub mod ease;
