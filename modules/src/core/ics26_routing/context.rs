use crate::core::ics02_client::context::{ClientKeeper, ClientReader};
use crate::core::ics03_connection::context::{ConnectionKeeper, ConnectionReader};

/// This trait captures all the functional dependencies (i.e., context) which the ICS26 module
/// requires to be able to dispatch messages to their corresponding ICS handler.
///
/// `deliver` works on a clone of the context and only writes it back once every message of a
/// batch went through, so implementors must make cloning yield an independent copy.
pub trait Ics26Context:
    ClientReader + ClientKeeper + ConnectionReader + ConnectionKeeper + Clone
{
}
