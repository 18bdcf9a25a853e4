// taskboard-common: shared types and the client-side view model for taskboard

pub mod protocol;
pub mod types;
pub mod view;
