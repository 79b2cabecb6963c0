//! Vocabulary service client
//!
//! Answers `GET <base>/<key>` with a JSON object: HGNC genes carry `id` and
//! `symbol`, HPO terms carry `id` and `name`. Parsing is left to the models.

use crate::config::ExternalEndpoints;
use crate::error::LookupError;
use crate::model::cancer_legend::TermNameService;
use crate::model::gene::GeneNameService;
use reqwest::blocking::Client;
use std::time::Duration;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client shared by the gene and term lookups
pub struct VocabularyClient {
    client: Client,
    endpoints: ExternalEndpoints,
}

impl VocabularyClient {
    pub fn new(endpoints: ExternalEndpoints) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoints })
    }

    fn fetch(&self, url: &str, key: &str) -> Result<String, LookupError> {
        tracing::debug!(url = %url, "vocabulary request");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                key: key.to_string(),
            });
        }
        Ok(response.text()?)
    }
}

impl GeneNameService for VocabularyClient {
    fn lookup(&self, key: &str) -> Result<String, LookupError> {
        self.fetch(&self.endpoints.gene_lookup_url(key), key)
    }
}

impl TermNameService for VocabularyClient {
    fn lookup(&self, id: &str) -> Result<String, LookupError> {
        self.fetch(&self.endpoints.term_lookup_url(id), id)
    }
}
