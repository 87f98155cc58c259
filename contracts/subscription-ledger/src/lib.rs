//! Stellarcade Subscription Ledger
//!
//! Sells time-bounded access passes. The admin defines plans with a price, a
//! duration and the token they are paid in. Users subscribe to receive a new
//! pass (minted by the credential registry), renew a pass they hold to push
//! its expiry forward, or cancel it. Payments accumulate in this contract and
//! are withdrawn by the admin.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, Registry, GracePeriod, ReminderWindow, Paused,
//!   NextPlanId and the re-entrancy lock. Small config in one ledger entry.
//! - `persistent()`: Plan per plan_id, allow-list entry per token, plan link
//!   and reminder flag per credential. Each bumped on every write.
//!
//! ## State Machine
//! A pass moves through the following phases as ledger time advances:
//!
//!   (none) --subscribe--> Active(expires_at)
//!   Active      --time passes--> GracePeriod  [expires_at <= now < expires_at + grace]
//!   GracePeriod --time passes--> Expired
//!   any         --renew-->       Active(max(expires_at, now) + duration)
//!   any         --cancel-->      expires_at = now (grace still applies)
//!
//! ## Invariants
//! - Renewal never moves an expiry backward: it extends from the later of the
//!   current expiry and the current time. Only `cancel` rewrites it to now.
//! - A reminder fires at most once per expiry period. Renewal re-arms it.
//! - The token allow-list is only consulted when a plan is created.
//! - Subscribe, renew, cancel and withdraw run under a re-entrancy lock.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, token::TokenClient,
    Address, Env,
};
use stellarcade_credential_registry::{CredentialRegistryClient, Error as RegistryError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
/// Bumped on every write so plan and pass data never expire.
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
    InvalidInput = 4,
    PlanNotFound = 5,
    PlanInactive = 6,
    TokenNotAllowed = 7,
    CredentialNotFound = 8,
    NotHolder = 9,
    Paused = 10,
    Reentrancy = 11,
    /// The payment token rejected a pull or push (balance or allowance).
    TransferFailed = 12,
    /// The credential registry refused a mint or expiry update.
    RegistryRejected = 13,
    Overflow = 14,
}

// ---------------------------------------------------------------------------
// Storage Types
// ---------------------------------------------------------------------------

/// Discriminants for all storage keys.
#[contracttype]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Registry,
    GracePeriod,
    ReminderWindow,
    Paused,
    NextPlanId,
    Locked,
    // --- persistent() ---
    Plan(u32),
    AllowedToken(Address),
    /// Plan a credential was last subscribed or renewed under.
    PlanOf(u64),
    ReminderSent(u64),
}

/// A priced, timed offering backed by one payment token.
///
/// Plans are never deleted; `active = false` only stops new subscriptions
/// and renewals against them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    /// Token amount charged per subscribe or renew.
    pub price: i128,
    /// Length of one period in seconds.
    pub duration: u64,
    /// SEP-41 token the price is paid in. Fixed at creation.
    pub token: Address,
    pub active: bool,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PassPhase {
    Active = 0,
    GracePeriod = 1,
    Expired = 2,
}

/// Public view of one pass.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PassStatus {
    pub credential_id: u64,
    pub holder: Address,
    /// Plan of the last subscribe/renew, or 0 if the pass was never linked.
    pub plan_id: u32,
    pub expires_at: u64,
    pub phase: PassPhase,
    pub reminder_sent: bool,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct PlanCreated {
    #[topic]
    pub plan_id: u32,
    pub price: i128,
    pub duration: u64,
    pub token: Address,
}

#[contractevent]
pub struct PlanActiveSet {
    #[topic]
    pub plan_id: u32,
    pub active: bool,
}

#[contractevent]
pub struct AllowedTokenSet {
    #[topic]
    pub token: Address,
    pub allowed: bool,
}

#[contractevent]
pub struct GracePeriodSet {
    pub grace_period: u64,
}

#[contractevent]
pub struct ReminderWindowSet {
    pub reminder_window: u64,
}

#[contractevent]
pub struct PausedSet {
    pub paused: bool,
}

#[contractevent]
pub struct Subscribed {
    #[topic]
    pub payer: Address,
    #[topic]
    pub credential_id: u64,
    pub plan_id: u32,
    pub expires_at: u64,
}

#[contractevent]
pub struct Renewed {
    #[topic]
    pub payer: Address,
    #[topic]
    pub credential_id: u64,
    pub plan_id: u32,
    pub expires_at: u64,
}

#[contractevent]
pub struct Cancellation {
    #[topic]
    pub payer: Address,
    #[topic]
    pub credential_id: u64,
    pub cancelled_at: u64,
}

#[contractevent]
pub struct RenewalReminder {
    #[topic]
    pub credential_id: u64,
    pub at: u64,
}

#[contractevent]
pub struct Withdrawal {
    #[topic]
    pub token: Address,
    #[topic]
    pub to: Address,
    pub amount: i128,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct SubscriptionLedger;

#[contractimpl]
impl SubscriptionLedger {
    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    /// Initialize the contract. May only be called once.
    ///
    /// `registry` must name this contract as its manager before the first
    /// subscription. `grace_period` and `reminder_window` are in seconds.
    pub fn init(
        env: Env,
        admin: Address,
        registry: Address,
        grace_period: u64,
        reminder_window: u64,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage()
            .instance()
            .set(&DataKey::GracePeriod, &grace_period);
        env.storage()
            .instance()
            .set(&DataKey::ReminderWindow, &reminder_window);
        env.storage().instance().set(&DataKey::Paused, &false);
        env.storage().instance().set(&DataKey::NextPlanId, &1u32);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // admin: plans, tokens, timing
    // -----------------------------------------------------------------------

    /// Create a plan and return its id. Admin only.
    ///
    /// `token` must already be on the allow-list. Ids start at 1 and are
    /// never reused.
    pub fn create_plan(
        env: Env,
        admin: Address,
        price: i128,
        duration: u64,
        token: Address,
    ) -> Result<u32, Error> {
        require_admin(&env, &admin)?;

        if price <= 0 || duration == 0 {
            return Err(Error::InvalidInput);
        }
        if token == env.current_contract_address() {
            return Err(Error::InvalidInput);
        }
        if !is_allowed(&env, &token) {
            return Err(Error::TokenNotAllowed);
        }

        let plan_id: u32 = env
            .storage()
            .instance()
            .get(&DataKey::NextPlanId)
            .ok_or(Error::NotInitialized)?;
        let next = plan_id.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().instance().set(&DataKey::NextPlanId, &next);

        let plan = Plan {
            price,
            duration,
            token: token.clone(),
            active: true,
        };
        put_plan(&env, plan_id, &plan);

        PlanCreated {
            plan_id,
            price,
            duration,
            token,
        }
        .publish(&env);

        Ok(plan_id)
    }

    /// Enable or disable new subscriptions and renewals for a plan. Passes
    /// already issued under it are unaffected.
    pub fn set_plan_active(
        env: Env,
        admin: Address,
        plan_id: u32,
        active: bool,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let mut plan = require_plan_exists(&env, plan_id)?;
        plan.active = active;
        put_plan(&env, plan_id, &plan);

        PlanActiveSet { plan_id, active }.publish(&env);

        Ok(())
    }

    pub fn set_allowed_token(
        env: Env,
        admin: Address,
        token: Address,
        allowed: bool,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let key = DataKey::AllowedToken(token.clone());
        env.storage().persistent().set(&key, &allowed);
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);

        AllowedTokenSet { token, allowed }.publish(&env);

        Ok(())
    }

    pub fn set_grace_period(env: Env, admin: Address, grace_period: u64) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        env.storage()
            .instance()
            .set(&DataKey::GracePeriod, &grace_period);
        GracePeriodSet { grace_period }.publish(&env);
        Ok(())
    }

    /// A window of 0 disables reminders.
    pub fn set_reminder_window(
        env: Env,
        admin: Address,
        reminder_window: u64,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        env.storage()
            .instance()
            .set(&DataKey::ReminderWindow, &reminder_window);
        ReminderWindowSet { reminder_window }.publish(&env);
        Ok(())
    }

    /// Stop subscribe, renew, cancel and reminders. Admin calls, including
    /// `withdraw`, keep working while paused.
    pub fn pause(env: Env, admin: Address) -> Result<(), Error> {
        set_paused(&env, &admin, true)
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), Error> {
        set_paused(&env, &admin, false)
    }

    /// Send `amount` of `token` held by this contract to `to`. Admin only.
    ///
    /// Payments from every plan pool into one balance per token.
    pub fn withdraw(
        env: Env,
        admin: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        require_admin(&env, &admin)?;

        let this = env.current_contract_address();
        if amount <= 0 || to == this || token == this {
            return Err(Error::InvalidInput);
        }

        with_lock(&env, || {
            let result = TokenClient::new(&env, &token).try_transfer(&this, &to, &amount);
            if !matches!(result, Ok(Ok(()))) {
                return Err(Error::TransferFailed);
            }

            Withdrawal {
                token: token.clone(),
                to: to.clone(),
                amount,
            }
            .publish(&env);

            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // subscribe
    // -----------------------------------------------------------------------

    /// Buy a new pass on `plan_id` for `payer` and return its credential id.
    ///
    /// The plan price is pulled from `payer` before anything is minted; if
    /// the token refuses the transfer nothing is written.
    pub fn subscribe(env: Env, payer: Address, plan_id: u32) -> Result<u64, Error> {
        require_initialized(&env)?;
        require_not_paused(&env)?;

        payer.require_auth();

        with_lock(&env, || {
            let plan = require_active_plan(&env, plan_id)?;

            let now = env.ledger().timestamp();
            let expires_at = now.checked_add(plan.duration).ok_or(Error::Overflow)?;

            collect_payment(&env, &payer, &plan)?;

            let registry = registry_client(&env)?;
            let credential_id = registry_result(registry.try_mint(
                &env.current_contract_address(),
                &payer,
                &expires_at,
            ))?;

            link_plan(&env, credential_id, plan_id);
            set_reminder_sent(&env, credential_id, false);

            Subscribed {
                payer: payer.clone(),
                credential_id,
                plan_id,
                expires_at,
            }
            .publish(&env);

            Ok(credential_id)
        })
    }

    // -----------------------------------------------------------------------
    // renew
    // -----------------------------------------------------------------------

    /// Extend a pass held by `payer` by one period of `plan_id`.
    ///
    /// The new expiry is `max(expires_at, now) + duration`: renewing early
    /// keeps the remaining time, renewing after a lapse starts from now. The
    /// pass is re-linked to `plan_id`, so renewal also switches plans.
    pub fn renew(env: Env, payer: Address, credential_id: u64, plan_id: u32) -> Result<(), Error> {
        require_initialized(&env)?;
        require_not_paused(&env)?;

        payer.require_auth();

        with_lock(&env, || {
            let registry = registry_client(&env)?;
            require_holder(&registry, &payer, credential_id)?;

            let plan = require_active_plan(&env, plan_id)?;

            let current = registry_result(registry.try_expiry_of(&credential_id))?;
            let base = current.max(env.ledger().timestamp());
            let expires_at = base.checked_add(plan.duration).ok_or(Error::Overflow)?;

            collect_payment(&env, &payer, &plan)?;

            registry_result(registry.try_set_expiry(
                &env.current_contract_address(),
                &credential_id,
                &expires_at,
            ))?;

            link_plan(&env, credential_id, plan_id);
            set_reminder_sent(&env, credential_id, false);

            Renewed {
                payer: payer.clone(),
                credential_id,
                plan_id,
                expires_at,
            }
            .publish(&env);

            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // cancel
    // -----------------------------------------------------------------------

    /// End a pass now: its expiry becomes the current time. No refund. The
    /// grace period still applies from that point.
    pub fn cancel(env: Env, payer: Address, credential_id: u64) -> Result<(), Error> {
        require_initialized(&env)?;
        require_not_paused(&env)?;

        payer.require_auth();

        with_lock(&env, || {
            let registry = registry_client(&env)?;
            require_holder(&registry, &payer, credential_id)?;

            let now = env.ledger().timestamp();
            registry_result(registry.try_set_expiry(
                &env.current_contract_address(),
                &credential_id,
                &now,
            ))?;

            Cancellation {
                payer: payer.clone(),
                credential_id,
                cancelled_at: now,
            }
            .publish(&env);

            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // check_for_reminder
    // -----------------------------------------------------------------------

    /// Emit `RenewalReminder` if the pass expires within the reminder window
    /// and no reminder has fired for the current period. Callable by anyone;
    /// returns whether a reminder was emitted.
    pub fn check_for_reminder(env: Env, credential_id: u64) -> Result<bool, Error> {
        require_initialized(&env)?;
        require_not_paused(&env)?;

        if is_reminder_sent(&env, credential_id) {
            return Ok(false);
        }
        let window = read_reminder_window(&env);
        if window == 0 {
            return Ok(false);
        }

        let registry = registry_client(&env)?;
        let expires_at = registry_result(registry.try_expiry_of(&credential_id))?;
        let now = env.ledger().timestamp();

        if now.saturating_add(window) < expires_at || now >= expires_at {
            return Ok(false);
        }

        set_reminder_sent(&env, credential_id, true);
        RenewalReminder {
            credential_id,
            at: now,
        }
        .publish(&env);

        Ok(true)
    }

    // -----------------------------------------------------------------------
    // access checks
    // -----------------------------------------------------------------------

    /// True while `now < expires_at + grace_period`. Does not look at the
    /// holder; use `can_access` for authorization.
    pub fn is_active(env: Env, credential_id: u64) -> Result<bool, Error> {
        let registry = registry_client(&env)?;
        let expires_at = registry_result(registry.try_expiry_of(&credential_id))?;
        Ok(env.ledger().timestamp() < expires_at.saturating_add(read_grace_period(&env)))
    }

    /// True when `identity` holds the pass and the pass is active.
    pub fn can_access(env: Env, identity: Address, credential_id: u64) -> Result<bool, Error> {
        let registry = registry_client(&env)?;
        let holder = registry_result(registry.try_owner_of(&credential_id))?;
        if holder != identity {
            return Ok(false);
        }
        let expires_at = registry_result(registry.try_expiry_of(&credential_id))?;
        Ok(env.ledger().timestamp() < expires_at.saturating_add(read_grace_period(&env)))
    }

    // -----------------------------------------------------------------------
    // views
    // -----------------------------------------------------------------------

    pub fn status_of(env: Env, credential_id: u64) -> Result<PassStatus, Error> {
        let registry = registry_client(&env)?;
        let holder = registry_result(registry.try_owner_of(&credential_id))?;
        let expires_at = registry_result(registry.try_expiry_of(&credential_id))?;

        let now = env.ledger().timestamp();
        let phase = if now < expires_at {
            PassPhase::Active
        } else if now < expires_at.saturating_add(read_grace_period(&env)) {
            PassPhase::GracePeriod
        } else {
            PassPhase::Expired
        };

        Ok(PassStatus {
            credential_id,
            holder,
            plan_id: env
                .storage()
                .persistent()
                .get(&DataKey::PlanOf(credential_id))
                .unwrap_or(0),
            expires_at,
            phase,
            reminder_sent: is_reminder_sent(&env, credential_id),
        })
    }

    pub fn get_plan(env: Env, plan_id: u32) -> Result<Plan, Error> {
        require_plan_exists(&env, plan_id)
    }

    /// Number of plans ever created.
    pub fn plan_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get::<_, u32>(&DataKey::NextPlanId)
            .map(|next| next - 1)
            .unwrap_or(0)
    }

    pub fn plan_of(env: Env, credential_id: u64) -> Result<u32, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::PlanOf(credential_id))
            .ok_or(Error::CredentialNotFound)
    }

    pub fn expiry_of(env: Env, credential_id: u64) -> Result<u64, Error> {
        let registry = registry_client(&env)?;
        registry_result(registry.try_expiry_of(&credential_id))
    }

    pub fn reminder_sent(env: Env, credential_id: u64) -> bool {
        is_reminder_sent(&env, credential_id)
    }

    pub fn is_token_allowed(env: Env, token: Address) -> bool {
        is_allowed(&env, &token)
    }

    pub fn grace_period(env: Env) -> u64 {
        read_grace_period(&env)
    }

    pub fn reminder_window(env: Env) -> u64 {
        read_reminder_window(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        read_paused(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn registry(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(Error::NotInitialized)
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

/// Verify that `caller` is the stored admin and has signed the invocation.
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

fn require_not_paused(env: &Env) -> Result<(), Error> {
    if read_paused(env) {
        return Err(Error::Paused);
    }
    Ok(())
}

fn set_paused(env: &Env, admin: &Address, paused: bool) -> Result<(), Error> {
    require_admin(env, admin)?;
    env.storage().instance().set(&DataKey::Paused, &paused);
    PausedSet { paused }.publish(env);
    Ok(())
}

/// Run `f` holding the re-entrancy lock. The lock is released whatever `f`
/// returns; a nested entry while it is held fails with `Reentrancy`.
fn with_lock<T>(env: &Env, f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    if env
        .storage()
        .instance()
        .get::<_, bool>(&DataKey::Locked)
        .unwrap_or(false)
    {
        return Err(Error::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Locked, &true);
    let result = f();
    env.storage().instance().remove(&DataKey::Locked);
    result
}

/// Fetch the plan definition or return `PlanNotFound`.
fn require_plan_exists(env: &Env, plan_id: u32) -> Result<Plan, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Plan(plan_id))
        .ok_or(Error::PlanNotFound)
}

fn require_active_plan(env: &Env, plan_id: u32) -> Result<Plan, Error> {
    let plan = require_plan_exists(env, plan_id)?;
    if !plan.active {
        return Err(Error::PlanInactive);
    }
    Ok(plan)
}

fn require_holder(
    registry: &CredentialRegistryClient,
    caller: &Address,
    credential_id: u64,
) -> Result<(), Error> {
    let holder = registry_result(registry.try_owner_of(&credential_id))?;
    if &holder != caller {
        return Err(Error::NotHolder);
    }
    Ok(())
}

fn put_plan(env: &Env, plan_id: u32, plan: &Plan) {
    let key = DataKey::Plan(plan_id);
    env.storage().persistent().set(&key, plan);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn link_plan(env: &Env, credential_id: u64, plan_id: u32) {
    let key = DataKey::PlanOf(credential_id);
    env.storage().persistent().set(&key, &plan_id);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn is_reminder_sent(env: &Env, credential_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::ReminderSent(credential_id))
        .unwrap_or(false)
}

fn set_reminder_sent(env: &Env, credential_id: u64, sent: bool) {
    let key = DataKey::ReminderSent(credential_id);
    env.storage().persistent().set(&key, &sent);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn is_allowed(env: &Env, token: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::AllowedToken(token.clone()))
        .unwrap_or(false)
}

fn read_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

fn read_grace_period(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::GracePeriod)
        .unwrap_or(0)
}

fn read_reminder_window(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ReminderWindow)
        .unwrap_or(0)
}

fn registry_client(env: &Env) -> Result<CredentialRegistryClient<'_>, Error> {
    let registry: Address = env
        .storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(Error::NotInitialized)?;
    Ok(CredentialRegistryClient::new(env, &registry))
}

/// Flatten a `try_` registry call into this contract's error space.
fn registry_result<T, C, I>(
    result: Result<Result<T, C>, Result<RegistryError, I>>,
) -> Result<T, Error> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(RegistryError::CredentialNotFound)) => Err(Error::CredentialNotFound),
        _ => Err(Error::RegistryRejected),
    }
}

/// Pull the plan price from `payer` into this contract.
fn collect_payment(env: &Env, payer: &Address, plan: &Plan) -> Result<(), Error> {
    let result = TokenClient::new(env, &plan.token).try_transfer(
        payer,
        &env.current_contract_address(),
        &plan.price,
    );
    if !matches!(result, Ok(Ok(()))) {
        return Err(Error::TransferFailed);
    }
    Ok(())
}
