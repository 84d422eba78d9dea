// src/backend/client.rs
use super::types::*;
use crate::core::config::BackendConfig;
use crate::core::prelude::*;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin typed wrapper over the portal backend's JSON endpoints.
///
/// No retries and no de-duplication: overlapping calls complete in whatever
/// order the network delivers them.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        log::debug!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        Ok(response.error_for_status()?.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        log::debug!("POST {}", path);
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    // ---------------- admin ----------------

    pub async fn admin_data(&self) -> Result<AdminData> {
        self.get_json("/admin/data").await
    }

    pub async fn add_commodity(&self, name: &str) -> Result<()> {
        self.post_json("/admin/add_commodity", &NameRequest { name })
            .await
    }

    pub async fn delete_commodity(&self, name: &str) -> Result<()> {
        self.post_json("/admin/delete_commodity", &NameRequest { name })
            .await
    }

    pub async fn add_disease(&self, name: &str, solution: &str) -> Result<()> {
        self.post_json("/admin/add_disease", &DiseaseRequest { name, solution })
            .await
    }

    // ---------------- price ----------------

    pub async fn price(&self, query: &PriceQuery) -> Result<PriceResponse> {
        log::debug!("GET /price {:?}", query);
        let response = self
            .http
            .get(self.url("/price"))
            .query(&query.params())
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }

    // ---------------- predict ----------------

    pub async fn predict(&self, image: Vec<u8>, file_name: &str) -> Result<Prediction> {
        log::debug!("POST /predict ({} bytes)", image.len());
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        let response = self
            .http
            .post(self.url("/predict"))
            .multipart(form)
            .send()
            .await?;
        Ok(response.error_for_status()?.json().await?)
    }

    // ---------------- auth ----------------

    pub async fn user(&self) -> Result<UserInfo> {
        self.get_json("/api/user").await
    }

    pub async fn logout(&self) -> Result<()> {
        log::debug!("POST /auth/logout");
        self.http
            .post(self.url("/auth/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
