use ct_codecs::{Base64, Decoder, Encoder};

use crate::error::Error;

pub(crate) fn to_base64(bytes: &[u8]) -> Result<String, Error> {
    Base64::encode_to_string(bytes).map_err(Error::Base64)
}

pub(crate) fn from_base64(input: &str) -> Result<Vec<u8>, Error> {
    Base64::decode_to_vec(input, None).map_err(Error::Base64)
}
