use flex_error::{define_error, DisplayOnly};

use ibc_verify_proto::protobuf::Error as ProtoError;

use crate::core::ics02_client;
use crate::core::ics03_connection;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        Ics02Client
            [ ics02_client::error::Error ]
            | _ | { "ICS02 client error" },

        Ics03Connection
            [ ics03_connection::error::Error ]
            | _ | { "ICS03 connection error" },

        UnknownMessageTypeUrl
            { url: String }
            | e | { format_args!("unknown type URL {0}", e.url) },

        MalformedMessageBytes
            [ DisplayOnly<ProtoError> ]
            | _ | { "the message is malformed and cannot be decoded" },
    }
}
