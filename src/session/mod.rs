/// Per-scene frame driver.
pub mod render_session;
