//! Top-level facade.

use crate::analysis::{Analyzer, DefaultTokenizer, IdentityStemmer, Stemmer, Tokenizer};
use crate::blueprint::Blueprint;
use crate::config::Config;
use crate::entity::{Column, Schema};
use crate::error::{CoreError, CoreResult};
use crate::index::Index;
use crate::repository::{Repository, SchemaRepository};
use crate::storage::Storage;
use blixt_storage::{StorageDriver, StorageError};
use std::sync::Arc;

/// Opens and creates indexes on one store.
///
/// # Example
///
/// ```rust
/// use blixt_core::{Blixt, Blueprint, Config, Indexable};
/// use blixt_storage::MemoryDriver;
/// use std::sync::Arc;
///
/// let blixt = Blixt::with_config(Arc::new(MemoryDriver::new()), Config::default()).unwrap();
/// let index = blixt
///     .create(&Blueprint::new("people").indexed("name").stored("age"))
///     .unwrap();
///
/// index
///     .add(&Indexable::new(1).field("name", "Joe Bloggs").field("age", 30))
///     .unwrap();
///
/// let postings = index.lookup("joe").unwrap();
/// assert_eq!(postings[0].field_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Blixt {
    storage: Storage,
    analyzer: Analyzer,
}

impl Blixt {
    /// Creates a facade over a driver with the given capabilities.
    ///
    /// The store is not installed; see [`Blixt::install`].
    pub fn new(
        driver: Arc<dyn StorageDriver>,
        tokenizer: Arc<dyn Tokenizer>,
        stemmer: Arc<dyn Stemmer>,
    ) -> Self {
        Self {
            storage: Storage::new(driver),
            analyzer: Analyzer::new(tokenizer, stemmer),
        }
    }

    /// Creates a facade with the default tokenizer and stemmer.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store is missing and
    /// `create_if_missing` is off, or if it cannot be created.
    pub fn with_config(driver: Arc<dyn StorageDriver>, config: Config) -> CoreResult<Self> {
        let blixt = Self::new(
            driver,
            Arc::new(DefaultTokenizer::new(config.tokenizer)),
            Arc::new(IdentityStemmer),
        );
        if config.create_if_missing {
            blixt.install()?;
        } else if !blixt.storage.exists()? {
            return Err(StorageError::NotCreated.into());
        }
        Ok(blixt)
    }

    /// Returns the repository manager.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Creates the store if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn install(&self) -> CoreResult<bool> {
        self.storage.install()?;
        Ok(true)
    }

    /// Destroys the store with every index in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn destroy(&self) -> CoreResult<bool> {
        self.storage.destroy()
    }

    /// Tells whether a schema with the name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub fn exists(&self, name: &str) -> CoreResult<bool> {
        Ok(self.storage.schemas().find_by_name(name)?.is_some())
    }

    /// Creates a schema from a blueprint.
    ///
    /// The schema and its columns are written in one transaction.
    ///
    /// # Errors
    ///
    /// - [`CoreError::IndexAlreadyExists`] if the name is taken
    /// - [`CoreError::InvalidBlueprint`] if the blueprint is invalid
    pub fn create(&self, blueprint: &Blueprint) -> CoreResult<Index> {
        blueprint.validate()?;
        let schema = self.storage.transaction(|storage| {
            if storage.schemas().find_by_name(blueprint.name())?.is_some() {
                return Err(CoreError::index_already_exists(blueprint.name()));
            }
            let schema = storage.schemas().create(Schema::new(blueprint.name()))?;
            let schema_id = SchemaRepository::id_of(&schema)?;
            let columns = blueprint
                .definitions()
                .iter()
                .map(|d| {
                    storage
                        .columns()
                        .create(Column::new(schema_id, d.name.as_str(), d.indexed, d.stored))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(schema.with_columns(columns))
        })?;
        tracing::info!(
            schema = schema.name(),
            columns = schema.columns().len(),
            "index created"
        );
        self.bind(schema)
    }

    /// Opens an existing schema.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SchemaDoesNotExist`] if there is no such schema
    /// - [`CoreError::InvalidSchema`] if the schema has no columns
    pub fn open(&self, name: &str) -> CoreResult<Index> {
        let schema = self
            .storage
            .schemas()
            .find_by_name(name)?
            .ok_or_else(|| CoreError::schema_does_not_exist(name))?;
        let schema_id = SchemaRepository::id_of(&schema)?;
        let columns = self.storage.columns().get_by_schema(schema_id)?;
        if columns.is_empty() {
            return Err(CoreError::invalid_schema(format!(
                "schema '{name}' has no columns"
            )));
        }
        self.bind(schema.with_columns(columns))
    }

    /// Opens the schema, or creates it from the blueprint built by
    /// `define` if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`Blixt::open`] and [`Blixt::create`].
    pub fn open_or_create<F>(&self, name: &str, define: F) -> CoreResult<Index>
    where
        F: FnOnce(Blueprint) -> Blueprint,
    {
        match self.open(name) {
            Err(CoreError::SchemaDoesNotExist { .. }) => {
                self.create(&define(Blueprint::new(name)))
            }
            result => result,
        }
    }

    fn bind(&self, schema: Schema) -> CoreResult<Index> {
        Index::new(schema, self.storage.clone(), self.analyzer.clone())
    }
}
