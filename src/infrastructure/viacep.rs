use async_trait::async_trait;
use log::warn;
use serde::Deserialize;

use crate::domain::address::{normalize_postal_code, Address};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressResolver;
use crate::domain::state::StateCode;

/// ViaCEP-compatible lookup: `GET {base_url}/{cep}/json/`.
pub struct ViaCepResolver {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepResolver {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, postal_code)
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepBody {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    /// `true` (sometimes the string "true") when the CEP does not exist.
    erro: Option<serde_json::Value>,
}

impl ViaCepBody {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s == "true",
            _ => false,
        }
    }

    fn into_address(self, postal_code: &str) -> Result<Address, DomainError> {
        if self.is_error() {
            return Err(DomainError::NotFound);
        }
        let state: StateCode = self
            .uf
            .parse()
            .map_err(|_| DomainError::Upstream(format!("unexpected uf '{}'", self.uf)))?;
        Ok(Address {
            postal_code: postal_code.to_string(),
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state,
        })
    }
}

#[async_trait]
impl AddressResolver for ViaCepResolver {
    async fn resolve(&self, postal_code: &str) -> Result<Address, DomainError> {
        let postal_code = normalize_postal_code(postal_code)?;
        let response = self
            .client
            .get(self.url(&postal_code))
            .send()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(DomainError::NotFound);
        }
        if !status.is_success() {
            warn!("address lookup for {} returned {}", postal_code, status);
            return Err(DomainError::Upstream(format!("lookup returned {}", status)));
        }

        let body: ViaCepBody = response
            .json()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;
        body.into_address(&postal_code)
    }
}
