//! Accounts service: the session/auth gate plus admin user management.
//!
//! There is exactly one active session. The session copy of a user is a
//! mirror of the collection row — every mutation goes through
//! [`AppState::update_user`] so the two never diverge.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use reelcart::users::{AccountStatus, NewAccount, PaymentInfo, User, UserId};

use crate::{
    domain::accounts::errors::AccountsServiceError,
    storage::Slot,
    store::{AppState, Store},
};

#[derive(Debug, Clone)]
pub struct StoreAccountsService {
    store: Store,
}

impl StoreAccountsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountsService for StoreAccountsService {
    async fn register(&self, account: NewAccount) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                if state.users.iter().any(|user| user.email == account.email) {
                    return Err(AccountsServiceError::AlreadyExists);
                }

                let user = User::register(account, Timestamp::now());
                state.users.push(user.clone());
                state.session = Some(user.clone());

                Ok(user)
            })
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                let user = state
                    .users
                    .iter()
                    .find(|user| user.email == email && user.password == password)
                    .ok_or(AccountsServiceError::InvalidCredentials)?;

                if user.status == AccountStatus::Banned {
                    return Err(AccountsServiceError::Banned);
                }

                let id = user.id;
                let updated = state
                    .update_user(id, |u| u.last_login = Some(Timestamp::now()))
                    .ok_or(AccountsServiceError::NotFound)?;

                state.session = Some(updated.clone());

                Ok(updated)
            })
    }

    async fn logout(&self) {
        self.store.mutate(&[Slot::Session], |state| {
            state.session = None;
        });
    }

    async fn current_user(&self) -> Option<User> {
        self.store.read(|state| state.session.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<User, AccountsServiceError> {
        self.store.read(|state| {
            state
                .find_user(id)
                .cloned()
                .ok_or(AccountsServiceError::NotFound)
        })
    }

    async fn list_users(&self) -> Vec<User> {
        self.store.read(|state| state.users.clone())
    }

    async fn update_payment_info(
        &self,
        info: PaymentInfo,
    ) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                let id = session_id(state)?;

                state
                    .update_user(id, |u| u.payment_info = Some(info))
                    .ok_or(AccountsServiceError::NotFound)
            })
    }

    async fn admin_reset_free_limit(&self, id: UserId) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                state
                    .update_user(id, |u| u.free_ads_used = 0)
                    .ok_or(AccountsServiceError::NotFound)
            })
    }

    async fn admin_add_credits(
        &self,
        id: UserId,
        credits: u32,
    ) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                state
                    .update_user(id, |u| {
                        u.paid_credits = u.paid_credits.saturating_add(credits);
                    })
                    .ok_or(AccountsServiceError::NotFound)
            })
    }

    async fn admin_set_status(
        &self,
        id: UserId,
        status: AccountStatus,
    ) -> Result<User, AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                state
                    .update_user(id, |u| u.status = status)
                    .ok_or(AccountsServiceError::NotFound)
            })
    }

    async fn admin_delete_user(&self, id: UserId) -> Result<(), AccountsServiceError> {
        self.store
            .try_mutate(&[Slot::Users, Slot::Session], |state| {
                let before = state.users.len();
                state.users.retain(|user| user.id != id);

                if state.users.len() == before {
                    return Err(AccountsServiceError::NotFound);
                }

                // Owned videos and orders are intentionally left in place;
                // reads tolerate dangling owner ids.
                if state.session.as_ref().is_some_and(|s| s.id == id) {
                    state.session = None;
                }

                Ok(())
            })
    }
}

fn session_id(state: &AppState) -> Result<UserId, AccountsServiceError> {
    state
        .session
        .as_ref()
        .map(|user| user.id)
        .ok_or(AccountsServiceError::NoSession)
}

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Create an account and establish it as the session. Email collisions
    /// are rejected with a case-sensitive match.
    async fn register(&self, account: NewAccount) -> Result<User, AccountsServiceError>;

    /// Sign in with an exact email and password match. Banned accounts are
    /// refused without establishing a session.
    async fn login(&self, email: &str, password: &str) -> Result<User, AccountsServiceError>;

    /// Clear the session.
    async fn logout(&self);

    /// The signed-in user, if any.
    async fn current_user(&self) -> Option<User>;

    /// Retrieve a single user.
    async fn get_user(&self, id: UserId) -> Result<User, AccountsServiceError>;

    /// Retrieve all users.
    async fn list_users(&self) -> Vec<User>;

    /// Replace the signed-in user's payout details.
    async fn update_payment_info(&self, info: PaymentInfo)
    -> Result<User, AccountsServiceError>;

    /// Zero a user's free-ad counter.
    async fn admin_reset_free_limit(&self, id: UserId) -> Result<User, AccountsServiceError>;

    /// Grant prepaid ad credits.
    async fn admin_add_credits(
        &self,
        id: UserId,
        credits: u32,
    ) -> Result<User, AccountsServiceError>;

    /// Ban or unban a user. Balance and history are untouched.
    async fn admin_set_status(
        &self,
        id: UserId,
        status: AccountStatus,
    ) -> Result<User, AccountsServiceError>;

    /// Delete a user. Owned entities are not cascaded.
    async fn admin_delete_user(&self, id: UserId) -> Result<(), AccountsServiceError>;
}
