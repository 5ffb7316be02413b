use crate::client::{GenesisClient, Query};
use crate::enums::Category;
use crate::error::Result;
use crate::models::FindResult;
use crate::validate;

/// `find` section: full text search
#[derive(Debug, Clone, Copy)]
pub struct Find<'a> {
    client: &'a GenesisClient,
}

impl<'a> Find<'a> {
    pub(crate) fn new(client: &'a GenesisClient) -> Self {
        Self { client }
    }

    /// Search all objects of `category` for `term`
    ///
    /// `results_per_category` caps every category separately (1 to 2500).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use destatis_genesis::{GenesisClient, Configuration, Category};
    /// # use std::sync::Arc;
    /// # async fn example(client: GenesisClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let hits = client.find().find("Einwohner", Category::Tables, 20).await?;
    /// println!("{} tables", hits.tables.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(
        &self,
        term: &str,
        category: Category,
        results_per_category: u32,
    ) -> Result<FindResult> {
        let term = validate::length("term", term, 1, usize::MAX)?;
        let results = validate::page_length(results_per_category)?;

        let query = Query::new()
            .set("term", term)
            .set("category", category)
            .set("pagelength", results);
        self.client.get_json("/find/find", query, true).await
    }
}
