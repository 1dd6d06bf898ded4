//! What a solo machine actually signs.

use prost::Message;

use ibc_verify_proto::ibc::lightclients::solomachine::v1::{
    SignBytes as RawSignBytes, StateData as RawStateData,
};

/// Bytes signed to attest `data` at `sequence`, bound to the signer's `diversifier`.
pub fn sign_bytes(sequence: u64, timestamp: u64, diversifier: &str, data: Vec<u8>) -> Vec<u8> {
    RawSignBytes {
        sequence,
        timestamp,
        diversifier: diversifier.to_string(),
        data,
    }
    .encode_to_vec()
}

/// The data signed to attest that `value` is stored under `path`.
pub fn state_data(path: &[u8], value: &[u8]) -> Vec<u8> {
    RawStateData {
        path: path.to_vec(),
        value: value.to_vec(),
    }
    .encode_to_vec()
}
