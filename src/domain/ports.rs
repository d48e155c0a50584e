use crate::domain::model::{Coordinates, JoinRow};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of agency join rows.
pub trait RowSource: Send + Sync {
    /// `Some(day)` restricts rows to that day-of-week (case-insensitive);
    /// `None` returns every row.
    fn load_rows(
        &self,
        day: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<JoinRow>>> + Send;
}

/// Resolves an address or ZIP code to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    fn provider(&self) -> &str;

    /// `Ok(None)` when the provider has no match for the query.
    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>>;
}

#[async_trait]
impl Geocoder for Box<dyn Geocoder> {
    fn provider(&self) -> &str {
        self.as_ref().provider()
    }

    async fn resolve(&self, query: &str) -> Result<Option<Coordinates>> {
        self.as_ref().resolve(query).await
    }
}
