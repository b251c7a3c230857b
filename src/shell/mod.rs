// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Open the SQLite store and apply migrations.
// - Wire the store and the clock into use case handlers.
// - Expose the HTTP routes and the read-only GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
