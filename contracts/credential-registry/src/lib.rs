//! Stellarcade Credential Registry
//!
//! Holds the access passes issued by the subscription ledger. Each pass is a
//! sequentially numbered credential with a holder and an expiry timestamp.
//! Holders may hand a pass to someone else with `transfer`; only the
//! configured manager may mint passes or move their expiry.
//!
//! ## Roles
//! - `admin`: set once at `init`, the only address allowed to call
//!   `set_manager`.
//! - `manager`: the only address allowed to call `mint` and `set_expiry`.
//!   In production this is the subscription ledger contract.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, Manager, NextId.
//! - `persistent()`: one `CredentialRecord` per credential id and one balance
//!   counter per holder, bumped on every write.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, Address, Env,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    ManagerNotSet = 4,
    CredentialNotFound = 5,
    NotOwner = 6,
    InvalidInput = 7,
    Overflow = 8,
}

// ---------------------------------------------------------------------------
// Storage Types
// ---------------------------------------------------------------------------

#[contracttype]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Manager,
    /// Id the next `mint` will hand out. Starts at 1.
    NextId,
    // --- persistent() ---
    Credential(u64),
    /// Number of credentials currently held by an address.
    Balance(Address),
}

/// Stored state of one credential.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CredentialRecord {
    pub holder: Address,
    /// Unix timestamp (seconds) after which the pass is no longer valid,
    /// not counting any grace period applied by the manager.
    pub expires_at: u64,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct ManagerSet {
    pub manager: Address,
}

#[contractevent]
pub struct CredentialMinted {
    #[topic]
    pub holder: Address,
    #[topic]
    pub credential_id: u64,
    pub expires_at: u64,
}

#[contractevent]
pub struct ExpirySet {
    #[topic]
    pub credential_id: u64,
    pub expires_at: u64,
}

#[contractevent]
pub struct CredentialTransferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub credential_id: u64,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct CredentialRegistry;

#[contractimpl]
impl CredentialRegistry {
    /// Initialize the registry. May only be called once.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::NextId, &1u64);

        Ok(())
    }

    /// Point the registry at the contract allowed to mint and re-date passes.
    ///
    /// The registry cannot manage itself, so its own address is rejected.
    pub fn set_manager(env: Env, admin: Address, manager: Address) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        if manager == env.current_contract_address() {
            return Err(Error::InvalidInput);
        }

        env.storage().instance().set(&DataKey::Manager, &manager);
        ManagerSet { manager }.publish(&env);

        Ok(())
    }

    /// Mint a new credential to `holder`. Manager only.
    pub fn mint(
        env: Env,
        manager: Address,
        holder: Address,
        expires_at: u64,
    ) -> Result<u64, Error> {
        require_manager(&env, &manager)?;

        let credential_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextId)
            .ok_or(Error::NotInitialized)?;
        let next = credential_id.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().instance().set(&DataKey::NextId, &next);

        let record = CredentialRecord {
            holder: holder.clone(),
            expires_at,
        };
        put_credential(&env, credential_id, &record);
        adjust_balance(&env, &holder, true)?;

        CredentialMinted {
            holder,
            credential_id,
            expires_at,
        }
        .publish(&env);

        Ok(credential_id)
    }

    /// Overwrite the expiry of an existing credential. Manager only.
    ///
    /// The registry does not enforce monotonicity; the manager decides.
    pub fn set_expiry(
        env: Env,
        manager: Address,
        credential_id: u64,
        expires_at: u64,
    ) -> Result<(), Error> {
        require_manager(&env, &manager)?;

        let mut record = require_credential(&env, credential_id)?;
        record.expires_at = expires_at;
        put_credential(&env, credential_id, &record);

        ExpirySet {
            credential_id,
            expires_at,
        }
        .publish(&env);

        Ok(())
    }

    /// Move `credential_id` from `from` to `to`. Only the current holder may
    /// transfer; the expiry travels with the pass.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        credential_id: u64,
    ) -> Result<(), Error> {
        require_initialized(&env)?;

        from.require_auth();

        let mut record = require_credential(&env, credential_id)?;
        if record.holder != from {
            return Err(Error::NotOwner);
        }
        if from == to {
            return Ok(());
        }

        record.holder = to.clone();
        put_credential(&env, credential_id, &record);
        adjust_balance(&env, &from, false)?;
        adjust_balance(&env, &to, true)?;

        CredentialTransferred {
            from,
            to,
            credential_id,
        }
        .publish(&env);

        Ok(())
    }

    pub fn expiry_of(env: Env, credential_id: u64) -> Result<u64, Error> {
        Ok(require_credential(&env, credential_id)?.expires_at)
    }

    pub fn owner_of(env: Env, credential_id: u64) -> Result<Address, Error> {
        Ok(require_credential(&env, credential_id)?.holder)
    }

    pub fn balance_of(env: Env, holder: Address) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(holder))
            .unwrap_or(0)
    }

    /// Number of credentials minted so far.
    pub fn total_minted(env: Env) -> u64 {
        env.storage()
            .instance()
            .get::<_, u64>(&DataKey::NextId)
            .map(|next| next - 1)
            .unwrap_or(0)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn manager(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Manager)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_initialized(env: &Env) -> Result<(), Error> {
    if !env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

/// Verify that `caller` is the configured manager and has signed the
/// invocation. A contract manager signs implicitly when it is the direct
/// invoker.
fn require_manager(env: &Env, caller: &Address) -> Result<(), Error> {
    require_initialized(env)?;
    let manager: Address = env
        .storage()
        .instance()
        .get(&DataKey::Manager)
        .ok_or(Error::ManagerNotSet)?;
    caller.require_auth();
    if caller != &manager {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn require_credential(env: &Env, credential_id: u64) -> Result<CredentialRecord, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Credential(credential_id))
        .ok_or(Error::CredentialNotFound)
}

fn put_credential(env: &Env, credential_id: u64, record: &CredentialRecord) {
    let key = DataKey::Credential(credential_id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn adjust_balance(env: &Env, holder: &Address, increase: bool) -> Result<(), Error> {
    let key = DataKey::Balance(holder.clone());
    let current: u64 = env.storage().persistent().get(&key).unwrap_or(0);
    let updated = if increase {
        current.checked_add(1).ok_or(Error::Overflow)?
    } else {
        current.checked_sub(1).ok_or(Error::Overflow)?
    };
    env.storage().persistent().set(&key, &updated);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
