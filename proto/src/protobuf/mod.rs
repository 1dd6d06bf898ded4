mod error;

use core::fmt::Display;

use prost::bytes::Buf;
use prost::Message;

pub use error::Error;

/// Conversions between a domain type and its protobuf counterpart `T`.
///
/// The raw type is the only thing that ever crosses the wire, so every domain type that is
/// committed to a store, signed over, or sent in a message implements this trait.
pub trait Protobuf<T: Message + Default>
where
    Self: Sized + Clone + TryFrom<T>,
    T: From<Self>,
    <Self as TryFrom<T>>::Error: Display,
{
    /// Encode into a buffer in Protobuf format.
    ///
    /// Uses [`prost::Message::encode`] after converting into its counterpart
    /// Protobuf data structure.
    fn encode(&self, buf: &mut Vec<u8>) -> Result<(), Error> {
        T::from(self.clone())
            .encode(buf)
            .map_err(Error::encode_message)
    }

    /// Constructor that attempts to decode an instance from a buffer.
    ///
    /// The entire buffer will be consumed.
    ///
    /// Similar to [`prost::Message::decode`] but with additional validation
    /// prior to constructing the destination type.
    fn decode<B: Buf>(buf: B) -> Result<Self, Error> {
        let raw = T::decode(buf).map_err(Error::decode_message)?;

        Self::try_from(raw).map_err(Error::try_from::<T, Self, _>)
    }

    /// Encodes into a Protobuf-encoded `Vec<u8>`.
    fn encode_vec(&self) -> Vec<u8> {
        T::from(self.clone()).encode_to_vec()
    }

    /// Constructor that attempts to decode a Protobuf-encoded instance from a
    /// `Vec<u8>` (or equivalent).
    fn decode_vec(v: &[u8]) -> Result<Self, Error> {
        Self::decode(v)
    }
}
