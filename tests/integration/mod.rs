//! Integration tests for the Linear CLI against a mock GraphQL endpoint

mod command_routes;
mod credentials;
mod graphql_transport;
mod resolution;
mod test_utils;
