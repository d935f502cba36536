//! The application-state aggregate and its coordination boundary.
//!
//! All entities live in one [`AppState`] behind a single `RwLock`; every
//! mutation runs inside the lock and then rewrites the touched slots in
//! full. Persistence is fire-and-forget: a failed write is logged and the
//! in-memory state stays authoritative for the rest of the session.

use std::sync::{Arc, RwLock};

use serde::{Serialize, de::DeserializeOwned};

use reelcart::{
    carts::CartItem,
    config::PlatformConfig,
    credits::CreditTransaction,
    orders::Order,
    users::{User, UserId},
    videos::Video,
    withdrawals::WithdrawalRequest,
};

use crate::storage::{Slot, Storage};

/// Everything the platform knows, as one aggregate.
#[derive(Debug, Default, Clone)]
pub struct AppState {
    /// All registered users.
    pub users: Vec<User>,

    /// The signed-in user, if any. Mirrored into `users` on every
    /// mutation — the collection is the source of truth.
    pub session: Option<User>,

    /// The cart, keyed by product id.
    pub cart: Vec<CartItem>,

    /// All videos, newest first.
    pub videos: Vec<Video>,

    /// All orders, newest first.
    pub orders: Vec<Order>,

    /// All withdrawal requests, newest first.
    pub withdrawals: Vec<WithdrawalRequest>,

    /// The append-only credit purchase ledger, newest first.
    pub credit_transactions: Vec<CreditTransaction>,

    /// Platform configuration and the revenue accumulator.
    pub config: PlatformConfig,
}

impl AppState {
    /// Find a user by id.
    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Apply `f` to the user with the given id, then refresh the session
    /// copy when that user is signed in. Returns the updated user, or
    /// `None` when the id is unknown.
    pub fn update_user(&mut self, id: UserId, f: impl FnOnce(&mut User)) -> Option<User> {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        f(user);
        let updated = user.clone();

        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.session = Some(updated.clone());
        }

        Some(updated)
    }
}

/// Shared handle to the state aggregate plus its storage backend.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
    storage: Arc<dyn Storage>,
}

impl Store {
    /// Load every slot from storage, substituting typed defaults for
    /// missing or corrupt slots, and return a ready store.
    #[must_use]
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let state = AppState {
            users: load_slot(storage.as_ref(), Slot::Users),
            session: load_slot(storage.as_ref(), Slot::Session),
            cart: load_slot(storage.as_ref(), Slot::Cart),
            videos: load_slot(storage.as_ref(), Slot::Videos),
            orders: load_slot(storage.as_ref(), Slot::Orders),
            withdrawals: load_slot(storage.as_ref(), Slot::Withdrawals),
            credit_transactions: load_slot(storage.as_ref(), Slot::CreditTransactions),
            config: PlatformConfig {
                platform_fee_percent: load_slot_or(
                    storage.as_ref(),
                    Slot::PlatformFee,
                    PlatformConfig::default().platform_fee_percent,
                ),
                ad_price: load_slot_or(
                    storage.as_ref(),
                    Slot::AdPrice,
                    PlatformConfig::default().ad_price,
                ),
                admin_pix_key: load_slot(storage.as_ref(), Slot::AdminPixKey),
                total_revenue: load_slot(storage.as_ref(), Slot::TotalRevenue),
            },
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            storage,
        }
    }

    /// Run a read-only closure against the state.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let state = self.state.read().expect("lock poisoned");
        f(&state)
    }

    /// Run a mutation and then rewrite the touched slots.
    pub fn mutate<R>(&self, slots: &[Slot], f: impl FnOnce(&mut AppState) -> R) -> R {
        let mut state = self.state.write().expect("lock poisoned");
        let result = f(&mut state);
        self.persist(&state, slots);
        result
    }

    /// Run a fallible mutation against a draft of the state; the draft is
    /// committed and the touched slots rewritten only on success, so a
    /// validation failure leaves both memory and disk untouched.
    pub fn try_mutate<R, E>(
        &self,
        slots: &[Slot],
        f: impl FnOnce(&mut AppState) -> Result<R, E>,
    ) -> Result<R, E> {
        let mut state = self.state.write().expect("lock poisoned");
        let mut draft = state.clone();
        let result = f(&mut draft);

        if result.is_ok() {
            *state = draft;
            self.persist(&state, slots);
        }

        result
    }

    fn persist(&self, state: &AppState, slots: &[Slot]) {
        for &slot in slots {
            let payload = match slot {
                Slot::Users => to_bytes(&state.users),
                Slot::Session => to_bytes(&state.session),
                Slot::Cart => to_bytes(&state.cart),
                Slot::Videos => to_bytes(&state.videos),
                Slot::Orders => to_bytes(&state.orders),
                Slot::Withdrawals => to_bytes(&state.withdrawals),
                Slot::CreditTransactions => to_bytes(&state.credit_transactions),
                Slot::PlatformFee => to_bytes(&state.config.platform_fee_percent),
                Slot::AdPrice => to_bytes(&state.config.ad_price),
                Slot::AdminPixKey => to_bytes(&state.config.admin_pix_key),
                Slot::TotalRevenue => to_bytes(&state.config.total_revenue),
            };

            let Some(bytes) = payload else { continue };

            if let Err(error) = self.storage.store(slot, &bytes) {
                tracing::warn!(slot = slot.key(), %error, "slot write failed; state kept in memory");
            }
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

fn to_bytes<T: Serialize>(value: &T) -> Option<Vec<u8>> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Some(bytes),
        Err(error) => {
            tracing::warn!(%error, "slot serialization failed");
            None
        }
    }
}

fn load_slot<T: DeserializeOwned + Default>(storage: &dyn Storage, slot: Slot) -> T {
    load_slot_or(storage, slot, T::default())
}

fn load_slot_or<T: DeserializeOwned>(storage: &dyn Storage, slot: Slot, default: T) -> T {
    let bytes = match storage.load(slot) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return default,
        Err(error) => {
            tracing::warn!(slot = slot.key(), %error, "slot load failed; using default");
            return default;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(slot = slot.key(), %error, "slot corrupt; using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use reelcart::users::{NewAccount, Role};

    use crate::storage::MemoryStorage;

    use super::*;

    fn user(name: &str) -> User {
        User::register(
            NewAccount {
                email: format!("{name}@example.com"),
                password: "pw".to_string(),
                name: name.to_string(),
                role: Role::Creator,
            },
            Timestamp::UNIX_EPOCH,
        )
    }

    #[test]
    fn open_empty_storage_yields_defaults() {
        let store = Store::open(Arc::new(MemoryStorage::new()));

        store.read(|state| {
            assert!(state.users.is_empty());
            assert!(state.session.is_none());
            assert_eq!(state.config, PlatformConfig::default());
        });
    }

    #[test]
    fn corrupt_slot_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.preload(Slot::Users, b"{not json".to_vec());
        storage.preload(Slot::AdPrice, b"\"fifty\"".to_vec());

        let store = Store::open(Arc::new(storage));

        store.read(|state| {
            assert!(state.users.is_empty());
            assert_eq!(state.config.ad_price, PlatformConfig::default().ad_price);
        });
    }

    #[test]
    fn mutations_survive_reopen() {
        let storage = Arc::new(MemoryStorage::new());

        {
            let store = Store::open(Arc::clone(&storage) as Arc<dyn Storage>);
            store.mutate(&[Slot::Users], |state| {
                state.users.push(user("ana"));
            });
        }

        let reopened = Store::open(storage);

        reopened.read(|state| {
            assert_eq!(state.users.len(), 1);
            assert_eq!(state.users.first().map(|u| u.name.as_str()), Some("ana"));
        });
    }

    #[test]
    fn failed_try_mutate_changes_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let store = Store::open(Arc::clone(&storage) as Arc<dyn Storage>);

        let result: Result<(), &str> = store.try_mutate(&[Slot::Users], |state| {
            state.users.push(user("ghost"));
            Err("validation failed")
        });

        assert!(result.is_err());

        // The draft was discarded: neither memory nor storage saw the push.
        store.read(|state| assert!(state.users.is_empty()));

        let reopened = Store::open(storage);
        reopened.read(|state| assert!(state.users.is_empty()));
    }

    #[test]
    fn update_user_mirrors_the_session_copy() {
        let store = Store::open(Arc::new(MemoryStorage::new()));
        let ana = user("ana");
        let id = ana.id;

        store.mutate(&[Slot::Users, Slot::Session], |state| {
            state.session = Some(ana.clone());
            state.users.push(ana);
        });

        let updated = store.mutate(&[Slot::Users, Slot::Session], |state| {
            state.update_user(id, |u| u.balance = 7_700)
        });
        assert!(updated.is_some());

        store.read(|state| {
            assert_eq!(state.find_user(id).map(|u| u.balance), Some(7_700));
            assert_eq!(state.session.as_ref().map(|u| u.balance), Some(7_700));
        });
    }
}
