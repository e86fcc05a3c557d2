// 🗄️ Receipt Store - Append-only, in-memory
//
// id → receipt, for the life of the process. Entries are inserted once and
// never updated or removed. Receipts are shared out as `Arc<Receipt>`, so a
// reader always sees a complete, immutable record.

use crate::error::{ReceiptError, Result};
use crate::receipt::Receipt;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

// ============================================================================
// RECEIPT ID
// ============================================================================

/// Opaque receipt identifier (UUID v4 text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    fn generate() -> Self {
        ReceiptId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// lets the map be queried with any &str, including ids we never issued
impl Borrow<str> for ReceiptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// RECEIPT STORE
// ============================================================================

/// Process-wide receipt store. Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ReceiptStore {
    receipts: Arc<RwLock<HashMap<ReceiptId, Arc<Receipt>>>>,
}

impl ReceiptStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a receipt under a freshly issued id.
    pub fn put(&self, receipt: Receipt) -> ReceiptId {
        let receipt = Arc::new(receipt);
        // a poisoned lock still guards a complete map: inserts are a single call
        let mut receipts = self.receipts.write().unwrap_or_else(PoisonError::into_inner);

        loop {
            let id = ReceiptId::generate();
            if let Entry::Vacant(slot) = receipts.entry(id.clone()) {
                slot.insert(receipt);
                return id;
            }
        }
    }

    /// Look up a receipt by an id previously returned from [`put`](Self::put).
    pub fn get(&self, id: &str) -> Result<Arc<Receipt>> {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    /// Number of stored receipts
    pub fn len(&self) -> usize {
        self.receipts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================
