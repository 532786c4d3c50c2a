// Composition root for the resource store.
//
// Responsibilities
// - Read settings from files and environment.
// - Instantiate the object store and the resource registry.
// - Wire them into the resource handlers and expose them over HTTP.

pub mod config;
pub mod http;
pub mod state;
