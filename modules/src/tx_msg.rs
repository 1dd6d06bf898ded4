use ibc_verify_proto::google::protobuf::Any;
use prost::Message;

/// A message a relayer submits to the host, convertible to its wire form.
pub trait Msg: Clone {
    type Raw: From<Self> + Message;

    /// The `type_url` under which [`crate::core::ics26_routing::handler::decode`] recognises
    /// this message.
    fn type_url(&self) -> String;

    /// The protobuf encoding of the message. Signers sign over exactly these bytes.
    fn get_sign_bytes(&self) -> Vec<u8> {
        let raw_msg: Self::Raw = self.clone().into();
        raw_msg.encode_to_vec()
    }

    fn to_any(&self) -> Any {
        Any {
            type_url: self.type_url(),
            value: self.get_sign_bytes(),
        }
    }
}
