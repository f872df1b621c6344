use std::fmt::Debug;

/// Envelope every backend endpoint answers with.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct BackendResponse {
    pub code: Option<String>,
    pub data: Option<serde_json::Value>,
    pub success: bool,
    pub msg: Option<String>,
}

impl BackendResponse {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            code: None,
            data: Some(data),
            success: true,
            msg: None,
        }
    }

    pub fn process<T: serde::de::DeserializeOwned + Debug>(self) -> Result<T, crate::Error> {
        if !self.success {
            if let Some(code) = self.code {
                tracing::error!("backend response: {:?}", self.msg);
                return Err(Self::match_error_code(&code, self.msg));
            }
            return Err(crate::Error::Backend(self.msg));
        }

        let data = self.data.unwrap_or(serde_json::Value::Null);
        tracing::debug!("backend response: {:?}", data);
        let res = vault_utils::serde_func::serde_from_value(data);
        if res.is_err() {
            tracing::error!("utils serde_from_value: {:?}", res);
        }
        Ok(res?)
    }

    fn match_error_code(code: &str, msg: Option<String>) -> crate::Error {
        match code {
            "600" => crate::error::BackendServiceError::MetadataExists.into(),
            "601" => crate::error::BackendServiceError::UnknownMultisig.into(),
            _ => crate::Error::Backend(msg),
        }
    }
}
