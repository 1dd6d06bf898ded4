//! The IBC core modules: clients, connections, commitments, host paths and message routing.

pub mod ics02_client;
pub mod ics03_connection;
pub mod ics23_commitment;
pub mod ics24_host;
pub mod ics26_routing;
