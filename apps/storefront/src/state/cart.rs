//! # Cart Store
//!
//! Owns the shopping cart for the session and keeps its persisted mirror
//! current.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Locking                                   │
//! │                                                                         │
//! │  cart: Mutex<Cart>          held only for in-memory reads/commits,      │
//! │                             never across an await                       │
//! │                                                                         │
//! │  locks: ProductLocks        one async lock per product id, held across  │
//! │                             fetch-then-mutate so two operations on the  │
//! │                             same id cannot both see "not in cart"       │
//! │                                                                         │
//! │  persist_lock               orders snapshot writes; with the dirty flag │
//! │                             the last write always carries the latest    │
//! │                             committed cart                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Lifecycle
//! ```text
//!  Idle ──► acquire(id) ──► InFlight (awaiting catalog) ──┬──► Committed ──► persist
//!                                                         └──► Aborted ───► notify
//! ```
//!
//! Every failure is both returned as an [`ApiError`] and sent to the
//! [`Notifier`]. An aborted operation leaves the cart untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use rocketshoes_api::CatalogApi;
use rocketshoes_core::validation::check_stock;
use rocketshoes_core::{
    Cart, CartItem, CartTotals, CoreError, CoreResult, ProductId, UpdateProductAmount,
    INITIAL_AMOUNT,
};
use rocketshoes_db::{CartRepository, DbResult};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};

use super::locks::ProductLocks;
use super::notify::Notifier;
use crate::error::{ApiError, ErrorCode};

/// The cart store shared by every command.
pub struct CartStore {
    /// The live cart
    cart: Mutex<Cart>,

    /// Set by every commit, cleared by a successful write
    dirty: AtomicBool,

    /// Orders snapshot writes
    persist_lock: AsyncMutex<()>,

    /// Per-product operation locks
    locks: ProductLocks,

    catalog: Arc<dyn CatalogApi>,
    repository: CartRepository,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.lock_cart())
            .field("dirty", &self.dirty.load(Ordering::Acquire))
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates a store around an already loaded cart.
    pub fn new(
        cart: Cart,
        catalog: Arc<dyn CatalogApi>,
        repository: CartRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        CartStore {
            cart: Mutex::new(cart),
            dirty: AtomicBool::new(false),
            persist_lock: AsyncMutex::new(()),
            locks: ProductLocks::new(),
            catalog,
            repository,
            notifier,
        }
    }

    /// Creates a store initialised from the persisted cart.
    ///
    /// An absent or unreadable snapshot gives an empty cart.
    pub async fn open(
        catalog: Arc<dyn CatalogApi>,
        repository: CartRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = repository.load().await;
        info!(items = cart.len(), key = repository.key(), "Cart store opened");
        Self::new(cart, catalog, repository, notifier)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a snapshot of the cart.
    pub fn cart(&self) -> Cart {
        self.lock_cart().clone()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock_cart())
    }

    /// Returns the cart totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.lock_cart())
    }

    /// Checks if a commit has not been written yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// ```text
    /// fetch stock (failure tolerated, check skipped)
    ///      │
    /// fetch product ── failure ──► AddProductError
    ///      │
    /// already in cart? ── yes ──► update amount to existing + 1
    ///      │ no
    /// stock.amount < 1? ── yes ──► OutOfStock
    ///      │ no
    /// append { ...product, amount: 1 }
    /// ```
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        debug!(product_id, "add_product");
        let _guard = self.locks.acquire(product_id).await;

        let result = self.add_locked(product_id).await;
        self.report(result)
    }

    /// Removes a product's line from the cart.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        debug!(product_id, "remove_product");
        let _guard = self.locks.acquire(product_id).await;

        let result = self
            .commit(|cart| cart.remove(product_id).map(drop))
            .map_err(|e| match e {
                CoreError::NotInCart(_) => ApiError::remove_product(e.to_string()),
                other => ApiError::from(other),
            });

        if result.is_ok() {
            self.persist_logged().await;
        }
        self.report(result)
    }

    /// Sets a product's line to an absolute amount.
    ///
    /// An amount below one is ignored without error or notification, so a
    /// "-" button can never take a line under one unit.
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<(), ApiError> {
        let UpdateProductAmount { product_id, amount } = request;
        debug!(product_id, amount, "update_product_amount");

        if amount < 1 {
            debug!(product_id, amount, "Amount below one ignored");
            return Ok(());
        }

        let _guard = self.locks.acquire(product_id).await;

        let result = self.update_amount_locked(product_id, amount).await;
        self.report(result)
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<(), ApiError> {
        debug!("clear");
        self.commit(|cart| {
            cart.clear();
            Ok(())
        })?;
        self.flush().await
    }

    /// Writes the cart if it has uncommitted changes.
    pub async fn flush(&self) -> Result<(), ApiError> {
        Ok(self.persist().await?)
    }

    /// Replaces the in-memory cart with the persisted one.
    pub async fn reload(&self) -> Cart {
        let _persist = self.persist_lock.lock().await;
        let cart = self.repository.load().await;

        *self.lock_cart() = cart.clone();
        self.dirty.store(false, Ordering::Release);

        info!(items = cart.len(), "Cart reloaded from storage");
        cart
    }

    // =========================================================================
    // Internals (callers hold the product lock)
    // =========================================================================

    async fn add_locked(&self, product_id: ProductId) -> Result<(), ApiError> {
        let stock = match self.catalog.fetch_stock(product_id).await {
            Ok(stock) => Some(stock),
            Err(e) => {
                warn!(product_id, error = %e, "Stock unavailable, adding without stock check");
                None
            }
        };

        let product = self
            .catalog
            .fetch_product(product_id)
            .await
            .map_err(|e| ApiError::add_product(e.to_string()))?;

        if product.id != product_id {
            return Err(ApiError::add_product(format!(
                "Requested product {} but received {}",
                product_id, product.id
            )));
        }

        if let Some(existing) = self.with_cart(|cart| cart.find(product_id).map(|i| i.amount)) {
            debug!(product_id, existing, "Already in cart, incrementing");
            let next = existing.checked_add(1).ok_or_else(|| {
                ApiError::new(
                    ErrorCode::OutOfStock,
                    format!("Product {} is already at the largest amount", product_id),
                )
            })?;
            return self.update_amount_locked(product_id, next).await;
        }

        if let Some(stock) = stock {
            check_stock(INITIAL_AMOUNT, &stock)?;
        }

        self.commit(|cart| cart.insert(CartItem::from_product(product, INITIAL_AMOUNT)))
            .map_err(|e| ApiError::add_product(e.to_string()))?;

        info!(product_id, "Product added to cart");
        self.persist_logged().await;
        Ok(())
    }

    async fn update_amount_locked(&self, product_id: ProductId, amount: i32) -> Result<(), ApiError> {
        if !self.with_cart(|cart| cart.contains(product_id)) {
            return Err(ApiError::update_amount(
                CoreError::NotInCart(product_id).to_string(),
            ));
        }

        let stock = self
            .catalog
            .fetch_stock(product_id)
            .await
            .map_err(|e| ApiError::update_amount(e.to_string()))?;

        check_stock(amount, &stock)?;

        // clear() takes no product lock, so the line may be gone by now.
        self.commit(|cart| cart.set_amount(product_id, amount))
            .map_err(|e| match e {
                CoreError::NotInCart(_) => ApiError::update_amount(e.to_string()),
                other => ApiError::from(other),
            })?;

        info!(product_id, amount, "Cart amount updated");
        self.persist_logged().await;
        Ok(())
    }

    /// Applies `f` to the live cart and marks it dirty on success.
    ///
    /// On failure the cart is left exactly as it was.
    fn commit<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Cart) -> CoreResult<()>,
    {
        let mut cart = self.lock_cart();
        let mut draft = cart.clone();
        f(&mut draft)?;

        *cart = draft;
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }

    /// Writes the latest cart if dirty.
    async fn persist(&self) -> DbResult<()> {
        let _persist = self.persist_lock.lock().await;

        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let snapshot = self.cart();
        if let Err(e) = self.repository.save(&snapshot).await {
            self.dirty.store(true, Ordering::Release);
            return Err(e);
        }
        Ok(())
    }

    /// Persists after a commit; a failed write stays dirty for the next one.
    async fn persist_logged(&self) {
        if let Err(e) = self.persist().await {
            error!(error = %e, "Failed to persist cart, will retry on next change");
        }
    }

    /// Sends the failure's notification and passes the result through.
    fn report(&self, result: Result<(), ApiError>) -> Result<(), ApiError> {
        if let Err(ref e) = result {
            warn!(code = ?e.code, message = %e.message, "Cart operation aborted");
            if let Some(notification) = e.notification() {
                self.notifier.notify(notification);
            }
        }
        result
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Notification;
    use async_trait::async_trait;
    use rocketshoes_api::{FetchError, FetchResult};
    use rocketshoes_core::{Product, Stock, CART_STORAGE_KEY};
    use rocketshoes_db::{DbError, KeyValueStore, MemoryStore};
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    // -------------------------------------------------------------------------
    // Fakes
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeCatalog {
        products: Mutex<HashMap<ProductId, Product>>,
        stock: Mutex<HashMap<ProductId, i32>>,
        stock_calls: AtomicUsize,
        latency: Option<Duration>,
    }

    impl FakeCatalog {
        fn with(entries: &[(ProductId, i32)]) -> Self {
            let catalog = FakeCatalog::default();
            for &(id, amount) in entries {
                catalog.products.lock().unwrap().insert(id, product(id));
                catalog.stock.lock().unwrap().insert(id, amount);
            }
            catalog
        }

        fn set_stock(&self, id: ProductId, amount: i32) {
            self.stock.lock().unwrap().insert(id, amount);
        }

        fn drop_stock(&self, id: ProductId) {
            self.stock.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn fetch_product(&self, product_id: ProductId) -> FetchResult<Product> {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.products
                .lock()
                .unwrap()
                .get(&product_id)
                .cloned()
                .ok_or(FetchError::NotFound {
                    path: format!("/products/{}", product_id),
                })
        }

        async fn fetch_stock(&self, product_id: ProductId) -> FetchResult<Stock> {
            self.stock_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.stock
                .lock()
                .unwrap()
                .get(&product_id)
                .map(|&amount| Stock {
                    id: product_id,
                    amount,
                })
                .ok_or(FetchError::Network {
                    path: format!("/stock/{}", product_id),
                    reason: "connection refused".to_string(),
                })
        }

        async fn list_products(&self) -> FetchResult<Vec<Product>> {
            Ok(self.products.lock().unwrap().values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> DbResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> DbResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DbError::QueryFailed("disk full".into()));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> DbResult<()> {
            self.inner.remove(key).await
        }
    }

    fn product(id: ProductId) -> Product {
        Product {
            id,
            title: format!("Tênis {}", id),
            price: 139.9,
            image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/tenis{}.jpg", id),
        }
    }

    struct Harness {
        store: CartStore,
        catalog: Arc<FakeCatalog>,
        notifier: Arc<RecordingNotifier>,
        kv: Arc<FlakyStore>,
    }

    impl Harness {
        async fn new(catalog: FakeCatalog) -> Self {
            Self::with_kv(catalog, FlakyStore::default()).await
        }

        async fn with_kv(catalog: FakeCatalog, kv: FlakyStore) -> Self {
            let catalog = Arc::new(catalog);
            let notifier = Arc::new(RecordingNotifier::default());
            let kv = Arc::new(kv);
            let repository = CartRepository::new(kv.clone(), CART_STORAGE_KEY);
            let store = CartStore::open(catalog.clone(), repository, notifier.clone()).await;
            Harness {
                store,
                catalog,
                notifier,
                kv,
            }
        }

        async fn persisted(&self) -> Option<Cart> {
            let raw = self.kv.get(CART_STORAGE_KEY).await.unwrap()?;
            Some(Cart::from_json(&raw).unwrap())
        }
    }

    fn update(product_id: ProductId, amount: i32) -> UpdateProductAmount {
        UpdateProductAmount { product_id, amount }
    }

    // -------------------------------------------------------------------------
    // Add
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_to_empty_cart() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;

        h.store.add_product(1).await.unwrap();

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, 1);
        assert_eq!(cart.items()[0].amount, 1);
        assert_eq!(cart.items()[0].title, "Tênis 1");
        assert!(h.notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_increments() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;

        h.store.add_product(1).await.unwrap();
        h.store.add_product(1).await.unwrap();

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1), 2);
    }

    #[tokio::test]
    async fn test_add_product_fetch_failure() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;

        let err = h.store.add_product(9).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::AddProductError);
        assert!(h.store.cart().is_empty());
        assert_eq!(h.notifier.seen(), vec![Notification::AddProductFailed]);
        assert!(h.persisted().await.is_none());
    }

    #[tokio::test]
    async fn test_add_with_no_stock_is_rejected() {
        let h = Harness::new(FakeCatalog::with(&[(1, 0)])).await;

        let err = h.store.add_product(1).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert!(h.store.cart().is_empty());
        assert_eq!(h.notifier.seen(), vec![Notification::OutOfStock]);
    }

    #[tokio::test]
    async fn test_add_without_stock_record_skips_check() {
        let catalog = FakeCatalog::with(&[(1, 5)]);
        catalog.drop_stock(1);
        let h = Harness::new(catalog).await;

        h.store.add_product(1).await.unwrap();

        assert_eq!(h.store.cart().amount_of(1), 1);
        assert!(h.notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_beyond_stock() {
        let h = Harness::new(FakeCatalog::with(&[(1, 1)])).await;

        h.store.add_product(1).await.unwrap();
        let err = h.store.add_product(1).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(h.store.cart().amount_of(1), 1);
        assert_eq!(h.notifier.seen(), vec![Notification::OutOfStock]);
    }

    #[tokio::test]
    async fn test_add_keeps_product_body_as_sent() {
        let catalog = FakeCatalog::with(&[(1, 5)]);
        catalog.products.lock().unwrap().get_mut(&1).unwrap().title = String::new();
        let h = Harness::new(catalog).await;

        h.store.add_product(1).await.unwrap();

        assert_eq!(h.store.cart().items()[0].title, "");
        assert!(h.notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_add_at_largest_amount_is_out_of_stock() {
        let snapshot = format!(
            r#"[{{"id":1,"title":"Tênis 1","price":139.9,"image":"tenis1.jpg","amount":{}}}]"#,
            i32::MAX
        );
        let kv = FlakyStore {
            inner: MemoryStore::with_entry(CART_STORAGE_KEY, snapshot),
            ..FlakyStore::default()
        };
        let h = Harness::with_kv(FakeCatalog::with(&[(1, 5)]), kv).await;

        let err = h.store.add_product(1).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(h.store.cart().amount_of(1), i32::MAX);
        assert_eq!(h.notifier.seen(), vec![Notification::OutOfStock]);
    }

    #[tokio::test]
    async fn test_totals_with_huge_price() {
        let catalog = FakeCatalog::with(&[(1, 5)]);
        catalog.products.lock().unwrap().get_mut(&1).unwrap().price = 1e17;
        let h = Harness::new(catalog).await;

        h.store.add_product(1).await.unwrap();
        h.store.update_product_amount(update(1, 2)).await.unwrap();

        let totals = h.store.totals();
        assert_eq!(totals.total_amount, 2);
        assert_eq!(totals.subtotal_cents, i64::MAX);
    }

    #[tokio::test]
    async fn test_concurrent_adds_same_id_stay_unique() {
        let catalog = FakeCatalog {
            latency: Some(Duration::from_millis(20)),
            ..FakeCatalog::with(&[(1, 5)])
        };
        let h = Harness::new(catalog).await;

        let (a, b) = tokio::join!(h.store.add_product(1), h.store.add_product(1));
        a.unwrap();
        b.unwrap();

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1), 2);
    }

    #[tokio::test]
    async fn test_concurrent_adds_different_ids() {
        let catalog = FakeCatalog {
            latency: Some(Duration::from_millis(20)),
            ..FakeCatalog::with(&[(1, 5), (2, 5)])
        };
        let h = Harness::new(catalog).await;

        let (a, b) = tokio::join!(h.store.add_product(1), h.store.add_product(2));
        a.unwrap();
        b.unwrap();

        assert_eq!(h.store.cart().len(), 2);
        assert_eq!(h.persisted().await.unwrap().len(), 2);
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_below_one_is_silent_noop() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        let before = h.store.cart().to_json().unwrap();
        let calls = h.catalog.stock_calls.load(Ordering::SeqCst);

        h.store.update_product_amount(update(1, 0)).await.unwrap();
        h.store.update_product_amount(update(1, -3)).await.unwrap();

        assert_eq!(h.store.cart().to_json().unwrap(), before);
        assert_eq!(h.catalog.stock_calls.load(Ordering::SeqCst), calls);
        assert!(h.notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_update_within_stock() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();

        h.store.update_product_amount(update(1, 5)).await.unwrap();

        assert_eq!(h.store.cart().amount_of(1), 5);
        assert_eq!(h.persisted().await.unwrap().amount_of(1), 5);
    }

    #[tokio::test]
    async fn test_update_beyond_stock() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.store.add_product(1).await.unwrap();

        let err = h.store.update_product_amount(update(1, 10)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert_eq!(h.store.cart().amount_of(1), 2);
        assert_eq!(h.notifier.seen(), vec![Notification::OutOfStock]);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;

        let err = h.store.update_product_amount(update(1, 2)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UpdateAmountError);
        assert_eq!(h.notifier.seen(), vec![Notification::UpdateAmountFailed]);
        assert_eq!(h.catalog.stock_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_stock_fetch_failure() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.catalog.drop_stock(1);

        let err = h.store.update_product_amount(update(1, 2)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UpdateAmountError);
        assert_eq!(h.store.cart().amount_of(1), 1);
        assert_eq!(h.notifier.seen(), vec![Notification::UpdateAmountFailed]);
    }

    #[tokio::test]
    async fn test_update_sees_fresh_stock() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.catalog.set_stock(1, 2);

        assert!(h.store.update_product_amount(update(1, 3)).await.is_err());
        assert!(h.store.update_product_amount(update(1, 2)).await.is_ok());
        assert_eq!(h.store.cart().amount_of(1), 2);
    }

    // -------------------------------------------------------------------------
    // Remove / clear
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remove_product() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5), (2, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.store.add_product(2).await.unwrap();

        h.store.remove_product(1).await.unwrap();

        let cart = h.store.cart();
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(1));
        assert_eq!(h.persisted().await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_remove_missing_product() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        let before = h.store.cart();

        let err = h.store.remove_product(7).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoveProductError);
        assert_eq!(h.store.cart(), before);
        assert_eq!(h.notifier.seen(), vec![Notification::RemoveProductFailed]);
    }

    #[tokio::test]
    async fn test_clear() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5), (2, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.store.add_product(2).await.unwrap();

        h.store.clear().await.unwrap();

        assert!(h.store.cart().is_empty());
        assert!(h.persisted().await.unwrap().is_empty());
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_persisted_cart_round_trips() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5), (2, 5)])).await;
        h.store.add_product(2).await.unwrap();
        h.store.add_product(1).await.unwrap();
        h.store.update_product_amount(update(2, 3)).await.unwrap();

        let reopened = CartStore::open(
            h.catalog.clone(),
            CartRepository::new(h.kv.clone(), CART_STORAGE_KEY),
            h.notifier.clone(),
        )
        .await;

        assert_eq!(reopened.cart(), h.store.cart());
        assert_eq!(reopened.cart().items()[0].id, 2);
    }

    #[tokio::test]
    async fn test_open_with_corrupt_snapshot_starts_empty() {
        let kv = FlakyStore {
            inner: MemoryStore::with_entry(CART_STORAGE_KEY, "{not json"),
            ..FlakyStore::default()
        };
        let h = Harness::with_kv(FakeCatalog::with(&[(1, 5)]), kv).await;

        assert!(h.store.cart().is_empty());

        h.store.add_product(1).await.unwrap();
        assert_eq!(h.persisted().await.unwrap().amount_of(1), 1);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_commit_and_stays_dirty() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.kv.fail_writes.store(true, Ordering::SeqCst);

        h.store.add_product(1).await.unwrap();

        assert_eq!(h.store.cart().amount_of(1), 1);
        assert!(h.store.is_dirty());
        assert!(h.persisted().await.is_none());
        assert!(h.store.flush().await.is_err());

        h.kv.fail_writes.store(false, Ordering::SeqCst);
        h.store.flush().await.unwrap();

        assert!(!h.store.is_dirty());
        assert_eq!(h.persisted().await.unwrap().amount_of(1), 1);
    }

    #[tokio::test]
    async fn test_aborted_operation_does_not_write() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;
        h.store.add_product(1).await.unwrap();
        assert!(!h.store.is_dirty());

        let _ = h.store.update_product_amount(update(1, 99)).await;

        assert!(!h.store.is_dirty());
        assert_eq!(h.persisted().await.unwrap().amount_of(1), 1);
    }

    #[tokio::test]
    async fn test_reload_discards_unwritten_changes() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5), (2, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.kv.fail_writes.store(true, Ordering::SeqCst);
        h.store.add_product(2).await.unwrap();

        let cart = h.store.reload().await;

        assert_eq!(cart.len(), 1);
        assert!(!h.store.is_dirty());
        assert_eq!(h.store.cart(), cart);
    }

    #[tokio::test]
    async fn test_totals() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5), (2, 5)])).await;
        h.store.add_product(1).await.unwrap();
        h.store.add_product(2).await.unwrap();
        h.store.update_product_amount(update(2, 2)).await.unwrap();

        let totals = h.store.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_amount, 3);
        assert_eq!(totals.subtotal_cents, 3 * 13990);
    }

    #[tokio::test]
    async fn test_worked_example() {
        let h = Harness::new(FakeCatalog::with(&[(1, 5)])).await;

        h.store.add_product(1).await.unwrap();
        assert_eq!(h.store.cart().amount_of(1), 1);

        h.store.add_product(1).await.unwrap();
        assert_eq!(h.store.cart().amount_of(1), 2);

        assert!(h.store.update_product_amount(update(1, 10)).await.is_err());
        assert_eq!(h.store.cart().amount_of(1), 2);
        assert_eq!(h.notifier.seen(), vec![Notification::OutOfStock]);
    }
}
