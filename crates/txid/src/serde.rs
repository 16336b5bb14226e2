use crate::{TXID_LEN, Txid};
use core::fmt;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer, de};

impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; TXID_LEN];
        s.serialize_str(self.encode_to_buf(&crate::Alphabet::HEX_LOWER, &mut buf))
    }
}

impl<'de> Deserialize<'de> for Txid {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct TxidVisitor;

        impl de::Visitor<'_> for TxidVisitor {
            type Value = Txid;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a {TXID_LEN}-character base32hex txid")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Txid::decode(v).map_err(E::custom)
            }
        }

        d.deserialize_str(TxidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{TXID_SIZE, Txid};

    #[test]
    fn serializes_as_encoded_string() {
        let id = Txid::from_parts(1000, [0; TXID_SIZE]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0000007q000000000000\"");
        assert_eq!(serde_json::from_str::<Txid>(&json).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_strings() {
        let err = serde_json::from_str::<Txid>("\"not-a-txid\"").unwrap_err();
        assert!(err.to_string().contains("invalid length"));
        assert!(serde_json::from_str::<Txid>("42").is_err());
    }
}
