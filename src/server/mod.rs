// Server module entry
// Listener binding, accept loop and shutdown signal handling

pub mod listener;
pub mod run;
pub mod signal;

pub use run::run;
