use serde::Deserialize;

pub fn serde_to_string<T: ?Sized + serde::Serialize>(value: &T) -> Result<String, crate::Error> {
    serde_json::to_string(value).map_err(|e| crate::Error::Serde(e.into()))
}

pub fn serde_from_str<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, crate::Error> {
    serde_json::from_str::<T>(value).map_err(|e| {
        crate::Error::Serde(crate::error::serde::SerdeError::Deserialize(format!(
            "error = {} value = {}",
            e, value
        )))
    })
}

pub fn serde_to_value<T: serde::Serialize>(value: T) -> Result<serde_json::Value, crate::Error> {
    serde_json::to_value(value).map_err(|e| crate::Error::Serde(e.into()))
}

pub fn serde_from_value<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, crate::Error> {
    serde_json::from_value(value).map_err(|e| crate::Error::Serde(e.into()))
}

pub fn serde_yaml_from_str<T: serde::de::DeserializeOwned>(value: &str) -> Result<T, crate::Error> {
    serde_yaml::from_str::<T>(value).map_err(|e| crate::Error::Serde(e.into()))
}

pub fn serde_yaml_to_string<T: ?Sized + serde::Serialize>(
    value: &T,
) -> Result<String, crate::Error> {
    serde_yaml::to_string(value).map_err(|e| crate::Error::Serde(e.into()))
}

/// `Option<Vec<u8>>` carried as a `0x` hex string on the wire.
pub mod hex_bytes_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&crate::hex_func::hex_encode_prefixed(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.is_empty() => crate::hex_func::hex_decode(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

pub fn deserialize_uppercase<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.to_uppercase())
}
