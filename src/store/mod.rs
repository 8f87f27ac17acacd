//! In-memory product catalog.
//!
//! [`RecordStore`] is the handle the product form writes through. The store
//! keeps insertion order; upserts replace in place or append.

mod product;

pub use product::Product;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

pub const SHORT_ID_LEN: usize = 8;
const ID_ATTEMPTS_PER_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    /// Replaced the record at this position.
    Replaced(usize),
}

pub trait RecordStore {
    fn list(&self) -> &[Product];

    fn replace_all(&mut self, records: Vec<Product>);

    /// Short id not used by any record currently in the store.
    fn generate_id(&mut self) -> String;

    fn get(&self, id: &str) -> Option<&Product> {
        self.list().iter().find(|product| product.id == id)
    }

    /// Full replace of the record with the same id, keeping its position;
    /// appends when no such record exists.
    fn upsert(&mut self, record: Product) -> Upserted {
        let mut records = self.list().to_vec();
        let outcome = match records.iter().position(|product| product.id == record.id) {
            Some(index) => {
                records[index] = record;
                Upserted::Replaced(index)
            }
            None => {
                records.push(record);
                Upserted::Inserted
            }
        };
        self.replace_all(records);
        outcome
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct ProductStore {
    products: Vec<Product>,
    rng: StdRng,
    id_len: usize,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::from_products(Vec::new())
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products,
            rng: StdRng::from_entropy(),
            id_len: SHORT_ID_LEN,
        }
    }

    /// Deterministic id sequence, for tests and reproducible demos.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Length ids start at; it grows when every attempt at the current
    /// length collides.
    pub fn with_id_len(mut self, id_len: usize) -> Self {
        self.id_len = id_len.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|product| product.id == id)?;
        tracing::info!(id, "removed product");
        Some(self.products.remove(index))
    }

    pub fn from_json(source: &str) -> Result<Self, StoreError> {
        let products: Vec<Product> = serde_json::from_str(source)?;
        Ok(Self::from_products(products))
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.products)?)
    }

    /// Reads a JSON array of products. A missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "catalog not found, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let store = Self::from_json(&source)?;
        tracing::debug!(path = %path.display(), products = store.len(), "loaded catalog");
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn random_id(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl RecordStore for ProductStore {
    fn list(&self) -> &[Product] {
        &self.products
    }

    fn replace_all(&mut self, records: Vec<Product>) {
        self.products = records;
    }

    fn generate_id(&mut self) -> String {
        let mut len = self.id_len;
        loop {
            for _ in 0..ID_ATTEMPTS_PER_LEN {
                let id = self.random_id(len);
                if self.get(&id).is_none() {
                    return id;
                }
                tracing::debug!(id = %id, "generated id already in use");
            }
            len += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Product, ProductStore, RecordStore, SHORT_ID_LEN, Upserted};
    use std::collections::HashSet;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Item {id}"),
            image: "https://x.com/a.png".to_string(),
            images: vec![],
            price,
            pieces: None,
            description: "desc".to_string(),
        }
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = ProductStore::from_products(vec![
            product("a", 1.0),
            product("b", 2.0),
            product("c", 3.0),
        ]);
        assert_eq!(store.upsert(product("b", 20.0)), Upserted::Replaced(1));
        let ids: Vec<&str> = store.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.get("b").map(|p| p.price), Some(20.0));
    }

    #[test]
    fn upsert_appends_unknown_id() {
        let mut store = ProductStore::from_products(vec![product("a", 1.0)]);
        assert_eq!(store.upsert(product("z", 5.0)), Upserted::Inserted);
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[1].id, "z");
    }

    #[test]
    fn generated_ids_are_short_and_unique() {
        let mut store = ProductStore::new().with_seed(7);
        let mut seen = HashSet::new();
        for n in 0..200 {
            let id = store.generate_id();
            assert_eq!(id.len(), SHORT_ID_LEN);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(seen.insert(id.clone()));
            store.upsert(product(&id, f64::from(n)));
        }
    }

    #[test]
    fn generated_id_skips_existing_records() {
        let first = ProductStore::new().with_seed(42).generate_id();
        let mut store = ProductStore::from_products(vec![product(&first, 1.0)]).with_seed(42);
        let second = store.generate_id();
        assert_ne!(first, second);
        assert!(store.get(&second).is_none());
    }

    #[test]
    fn generated_id_grows_when_length_is_exhausted() {
        let taken: Vec<Product> = ('0'..='9')
            .chain('a'..='z')
            .chain('A'..='Z')
            .map(|c| product(&c.to_string(), 1.0))
            .collect();
        let mut store = ProductStore::from_products(taken)
            .with_seed(3)
            .with_id_len(1);

        let id = store.generate_id();
        assert_eq!(id.len(), 2);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn remove_drops_record() {
        let mut store = ProductStore::from_products(vec![product("a", 1.0), product("b", 2.0)]);
        assert_eq!(store.remove("a").map(|p| p.id), Some("a".to_string()));
        assert!(store.remove("a").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn catalog_json_round_trip() {
        let store = ProductStore::from_products(vec![product("a", 1.0)]);
        let json = store.to_json().expect("serialize");
        let loaded = ProductStore::from_json(&json).expect("parse");
        assert_eq!(loaded.list(), store.list());
    }

    #[test]
    fn missing_catalog_file_is_empty() {
        let path = std::env::temp_dir().join("storefront-forms-missing-catalog.json");
        let _ = std::fs::remove_file(&path);
        let store = ProductStore::load(&path).expect("load");
        assert!(store.is_empty());
    }
}
