//! Mutable in-memory store behind the staff console.
//!
//! All admin data (menu, orders, staff, settings) lives in one `RwLock`.
//! Mutations clone out of the lock quickly; no guard is ever held across
//! an await point. Data resets to the seed set on restart.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use thiserror::Error;

use masoro_core::catalog::{DraftError, MenuItem, MenuItemDraft};
use masoro_core::order::{Order, OrderDraft, OrderDraftError};
use masoro_core::seed;
use masoro_core::settings::RestaurantSettings;
use masoro_core::staff::{StaffAccount, StaffDraft, StaffError};
use masoro_core::types::{MenuItemId, OrderId, OrderStatus};

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("menu item {0} not found")]
    MenuItemNotFound(MenuItemId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("staff account '{0}' not found")]
    StaffNotFound(String),

    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("you cannot delete your own account")]
    SelfDelete,

    #[error("you cannot deactivate your own account")]
    SelfDeactivate,

    #[error(transparent)]
    InvalidMenuItem(#[from] DraftError),

    #[error(transparent)]
    InvalidStaff(#[from] StaffError),

    #[error(transparent)]
    InvalidOrder(#[from] OrderDraftError),
}

struct StoreInner {
    menu: Vec<MenuItem>,
    next_menu_id: i32,
    orders: Vec<Order>,
    next_order_seq: u32,
    staff: Vec<StaffAccount>,
    settings: RestaurantSettings,
}

/// Handle to the shared store. Cheap to clone.
#[derive(Clone)]
pub struct AdminStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for AdminStore {
    fn default() -> Self {
        Self::from_seed()
    }
}

impl AdminStore {
    /// Build a store preloaded with the seed data set.
    #[must_use]
    pub fn from_seed() -> Self {
        let menu = seed::menu_items();
        let next_menu_id = menu.iter().map(|i| i.id.as_i32()).max().unwrap_or(0) + 1;
        let orders = seed::orders();
        let next_order_seq = u32::try_from(orders.len()).unwrap_or(0) + 1;

        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                menu,
                next_menu_id,
                orders,
                next_order_seq,
                staff: seed::staff_accounts(),
                settings: seed::settings(),
            })),
        }
    }

    // A poisoned lock means another handler panicked mid-write; the data
    // itself is still usable, so recover the guard rather than unwind.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// All menu items, in menu order.
    #[must_use]
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.read().menu.clone()
    }

    /// Look up one menu item.
    #[must_use]
    pub fn menu_item(&self, id: MenuItemId) -> Option<MenuItem> {
        self.read().menu.iter().find(|i| i.id == id).cloned()
    }

    /// Validate a draft and append it as a new item with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidMenuItem` when the draft fails
    /// validation (empty name, non-positive price, happy hour price above
    /// the regular price, rating out of range).
    pub fn add_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, StoreError> {
        let mut inner = self.write();
        let id = MenuItemId::new(inner.next_menu_id);
        let item = draft.into_item(id, Utc::now())?;
        inner.next_menu_id += 1;
        inner.menu.push(item.clone());
        Ok(item)
    }

    /// Validate a draft and apply it to an existing item.
    ///
    /// # Errors
    ///
    /// Returns `MenuItemNotFound` for an unknown id, or
    /// `InvalidMenuItem` when the draft fails validation.
    pub fn update_menu_item(
        &self,
        id: MenuItemId,
        draft: MenuItemDraft,
    ) -> Result<MenuItem, StoreError> {
        let mut inner = self.write();
        let Some(pos) = inner.menu.iter().position(|i| i.id == id) else {
            return Err(StoreError::MenuItemNotFound(id));
        };
        let updated = draft.apply_to(&inner.menu[pos], Utc::now())?;
        inner.menu[pos] = updated.clone();
        Ok(updated)
    }

    /// Remove an item from the menu.
    ///
    /// # Errors
    ///
    /// Returns `MenuItemNotFound` for an unknown id.
    pub fn delete_menu_item(&self, id: MenuItemId) -> Result<(), StoreError> {
        let mut inner = self.write();
        let Some(pos) = inner.menu.iter().position(|i| i.id == id) else {
            return Err(StoreError::MenuItemNotFound(id));
        };
        inner.menu.remove(pos);
        Ok(())
    }

    /// Flip the availability flag.
    ///
    /// # Errors
    ///
    /// Returns `MenuItemNotFound` for an unknown id.
    pub fn toggle_availability(&self, id: MenuItemId) -> Result<MenuItem, StoreError> {
        let mut inner = self.write();
        let Some(item) = inner.menu.iter_mut().find(|i| i.id == id) else {
            return Err(StoreError::MenuItemNotFound(id));
        };
        item.available = !item.available;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Copy an item under a fresh id, with "(Copy)" appended to the name
    /// and sales history reset.
    ///
    /// # Errors
    ///
    /// Returns `MenuItemNotFound` for an unknown id.
    pub fn duplicate_menu_item(&self, id: MenuItemId) -> Result<MenuItem, StoreError> {
        let mut inner = self.write();
        let Some(source) = inner.menu.iter().find(|i| i.id == id).cloned() else {
            return Err(StoreError::MenuItemNotFound(id));
        };
        let mut draft = MenuItemDraft::from(&source);
        draft.name = format!("{} (Copy)", source.name);
        let new_id = MenuItemId::new(inner.next_menu_id);
        let copy = draft.into_item(new_id, Utc::now())?;
        inner.next_menu_id += 1;
        inner.menu.push(copy.clone());
        Ok(copy)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// All orders, newest first.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        let mut orders = self.read().orders.clone();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        orders
    }

    /// Look up one order.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.read().orders.iter().find(|o| &o.id == id).cloned()
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown id.
    pub fn set_order_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order, StoreError> {
        let mut inner = self.write();
        let Some(order) = inner.orders.iter_mut().find(|o| &o.id == id) else {
            return Err(StoreError::OrderNotFound(id.clone()));
        };
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    /// Validate a draft and apply it to an existing order's customer
    /// fields. Lines, total, and status are untouched.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown id, or `InvalidOrder` when
    /// the draft fails validation.
    pub fn update_order(&self, id: &OrderId, draft: OrderDraft) -> Result<Order, StoreError> {
        let mut inner = self.write();
        let Some(pos) = inner.orders.iter().position(|o| &o.id == id) else {
            return Err(StoreError::OrderNotFound(id.clone()));
        };
        let updated = draft.apply_to(&inner.orders[pos], Utc::now())?;
        inner.orders[pos] = updated.clone();
        Ok(updated)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown id.
    pub fn delete_order(&self, id: &OrderId) -> Result<(), StoreError> {
        let mut inner = self.write();
        let Some(pos) = inner.orders.iter().position(|o| &o.id == id) else {
            return Err(StoreError::OrderNotFound(id.clone()));
        };
        inner.orders.remove(pos);
        Ok(())
    }

    /// Re-submit a copy of an order: fresh id, pending, placed now.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown id.
    pub fn duplicate_order(&self, id: &OrderId) -> Result<Order, StoreError> {
        let mut inner = self.write();
        let Some(source) = inner.orders.iter().find(|o| &o.id == id).cloned() else {
            return Err(StoreError::OrderNotFound(id.clone()));
        };
        let new_id = OrderId::from_seq(inner.next_order_seq);
        inner.next_order_seq += 1;
        let copy = source.duplicate_as(new_id, Utc::now());
        inner.orders.push(copy.clone());
        Ok(copy)
    }

    // =========================================================================
    // Staff
    // =========================================================================

    /// All staff accounts.
    #[must_use]
    pub fn staff(&self) -> Vec<StaffAccount> {
        self.read().staff.clone()
    }

    /// Look up an account by username.
    #[must_use]
    pub fn staff_by_username(&self, username: &str) -> Option<StaffAccount> {
        self.read()
            .staff
            .iter()
            .find(|s| s.username == username)
            .cloned()
    }

    /// Validate a draft and add a new account. Usernames are unique.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` when the username is taken, or
    /// `InvalidStaff` when the draft fails validation.
    pub fn add_staff(&self, draft: StaffDraft) -> Result<StaffAccount, StoreError> {
        let mut inner = self.write();
        if inner.staff.iter().any(|s| s.username == draft.username) {
            return Err(StoreError::DuplicateUsername(draft.username));
        }
        let account = draft.into_account(Utc::now())?;
        inner.staff.push(account.clone());
        Ok(account)
    }

    /// Validate a draft and apply it to an existing account. The username
    /// itself never changes; creation time and last login are preserved.
    ///
    /// # Errors
    ///
    /// Returns `StaffNotFound` for an unknown username, or `InvalidStaff`
    /// when the draft fails validation.
    pub fn update_staff(
        &self,
        username: &str,
        draft: StaffDraft,
    ) -> Result<StaffAccount, StoreError> {
        draft.validate()?;
        let mut inner = self.write();
        let Some(account) = inner.staff.iter_mut().find(|s| s.username == username) else {
            return Err(StoreError::StaffNotFound(username.to_owned()));
        };
        account.password = draft.password;
        account.email = draft.email;
        account.phone = draft.phone;
        account.security_question = draft.security_question;
        account.security_answer = draft.security_answer;
        account.role = draft.role;
        account.is_active = draft.is_active;
        account.first_name = draft.first_name;
        account.last_name = draft.last_name;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    /// Delete an account. Staff cannot delete themselves.
    ///
    /// # Errors
    ///
    /// Returns `SelfDelete` when `username == acting_username`, or
    /// `StaffNotFound` for an unknown username.
    pub fn delete_staff(&self, username: &str, acting_username: &str) -> Result<(), StoreError> {
        if username == acting_username {
            return Err(StoreError::SelfDelete);
        }
        let mut inner = self.write();
        let Some(pos) = inner.staff.iter().position(|s| s.username == username) else {
            return Err(StoreError::StaffNotFound(username.to_owned()));
        };
        inner.staff.remove(pos);
        Ok(())
    }

    /// Flip an account's active flag. Staff cannot deactivate themselves.
    ///
    /// # Errors
    ///
    /// Returns `SelfDeactivate` when `username == acting_username`, or
    /// `StaffNotFound` for an unknown username.
    pub fn toggle_staff_active(
        &self,
        username: &str,
        acting_username: &str,
    ) -> Result<StaffAccount, StoreError> {
        let mut inner = self.write();
        let Some(account) = inner.staff.iter_mut().find(|s| s.username == username) else {
            return Err(StoreError::StaffNotFound(username.to_owned()));
        };
        if username == acting_username && account.is_active {
            return Err(StoreError::SelfDeactivate);
        }
        account.is_active = !account.is_active;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    /// Record a successful login.
    pub fn record_login(&self, username: &str) {
        let mut inner = self.write();
        if let Some(account) = inner.staff.iter_mut().find(|s| s.username == username) {
            account.last_login = Some(Utc::now());
        }
    }

    /// Overwrite an account's password (recovery flow, step five).
    ///
    /// # Errors
    ///
    /// Returns `StaffNotFound` for an unknown username.
    pub fn reset_password(&self, username: &str, password: String) -> Result<(), StoreError> {
        let mut inner = self.write();
        let Some(account) = inner.staff.iter_mut().find(|s| s.username == username) else {
            return Err(StoreError::StaffNotFound(username.to_owned()));
        };
        account.password = password;
        account.updated_at = Utc::now();
        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Snapshot of the current restaurant settings.
    #[must_use]
    pub fn settings(&self) -> RestaurantSettings {
        self.read().settings.clone()
    }

    /// Replace the restaurant settings wholesale.
    pub fn update_settings(&self, settings: RestaurantSettings) {
        let mut inner = self.write();
        inner.settings = settings;
    }
}
