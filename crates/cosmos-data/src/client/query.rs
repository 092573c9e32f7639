//! Query execution entry point.

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;
use crate::query::{QueryRequest, QueryStream};

impl super::CosmosDatabaseClient {
    /// Execute a query and return its result stream.
    ///
    /// The request is validated here, before any network round trip; the
    /// first page is fetched lazily when the stream is first pulled.
    /// Cross-partition fan-out requires opt-in via the request: without it,
    /// the store rejects multi-partition queries before producing a page,
    /// and the rejection surfaces with both remedies named.
    #[instrument(skip(self), fields(container = %request.container()))]
    pub fn query_items<T: DeserializeOwned>(
        &self,
        request: QueryRequest,
    ) -> Result<QueryStream<T>> {
        request.validate()?;
        let link = self.collection_link(request.container());
        Ok(QueryStream::new(self.client().clone(), link, request))
    }
}
