use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder};

use super::RecordStore;
use crate::config::StoreConfig;
use crate::model::{NewStudent, Student, StudentPatch};
use crate::query::Predicate;

const TABLE: &str = "students";

/// Client for the hosted table store's REST surface (PostgREST-style):
/// filters ride in the query string as `field=op.value`, inserts return the
/// stored representation on request.
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, TABLE)
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Map a predicate to the store's query operator syntax. The URL form
    /// of `ilike` uses `*` where SQL uses `%`.
    fn query_pair(predicate: &Predicate) -> (&'static str, String) {
        match predicate {
            Predicate::Eq { field, value } => (field, format!("eq.{value}")),
            Predicate::ILike { field, pattern } => {
                (field, format!("ilike.{}", pattern.replace('%', "*")))
            }
        }
    }
}

impl RecordStore for HttpStore {
    fn select(&self, predicates: &[Predicate]) -> anyhow::Result<Vec<Student>> {
        let mut pairs: Vec<(&str, String)> = vec![("select", "*".to_string())];
        pairs.extend(predicates.iter().map(Self::query_pair));

        let resp = self
            .with_auth(self.client.get(self.table_url()).query(&pairs))
            .send()
            .context("select request failed")?
            .error_for_status()
            .context("select rejected by store")?;
        resp.json().context("select returned malformed rows")
    }

    fn insert(&self, rows: &[NewStudent]) -> anyhow::Result<Vec<Student>> {
        let resp = self
            .with_auth(
                self.client
                    .post(self.table_url())
                    .header("Prefer", "return=representation")
                    .json(rows),
            )
            .send()
            .context("insert request failed")?
            .error_for_status()
            .context("insert rejected by store")?;
        resp.json().context("insert returned malformed rows")
    }

    fn update(&self, id: &str, patch: &StudentPatch) -> anyhow::Result<()> {
        self.with_auth(
            self.client
                .patch(self.table_url())
                .query(&[("id", format!("eq.{id}"))])
                .json(patch),
        )
        .send()
        .context("update request failed")?
        .error_for_status()
        .context("update rejected by store")?;
        Ok(())
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.with_auth(
            self.client
                .delete(self.table_url())
                .query(&[("id", format!("eq.{id}"))]),
        )
        .send()
        .context("delete request failed")?
        .error_for_status()
        .context("delete rejected by store")?;
        Ok(())
    }
}
