pub mod bios;
pub mod events;
pub mod external;
pub mod helpers;
pub mod session_speakers;
pub mod sessions;
pub mod speakers;
