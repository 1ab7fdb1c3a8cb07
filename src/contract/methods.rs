//! Contract method tables.
//!
//! Every endpoint maps to one [`ContractMethod`]: a method name, the body
//! fields it requires, and the fixed gas and deposit attached to the call.
//! The two services expose independent tables, see [`Service`].

use std::fmt;

use super::types::{Balance, Gas, DEFAULT_GAS, HEAVY_GAS, ONE_YOCTO};
use super::validation::Field;

/// Path prefix shared by all contract call endpoints.
pub const API_PREFIX: &str = "/api";

/// A callable contract method and its fixed call parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractMethod {
    pub name: &'static str,
    pub summary: &'static str,
    pub fields: &'static [Field],
    pub gas: Gas,
    pub deposit: Balance,
}

impl ContractMethod {
    const fn new(name: &'static str, summary: &'static str, fields: &'static [Field]) -> Self {
        Self {
            name,
            summary,
            fields,
            gas: DEFAULT_GAS,
            deposit: 0,
        }
    }

    const fn with_gas(mut self, gas: Gas) -> Self {
        self.gas = gas;
        self
    }

    const fn with_deposit(mut self, deposit: Balance) -> Self {
        self.deposit = deposit;
        self
    }

    /// HTTP path the method is served under.
    pub fn path(&self) -> String {
        format!("{}/{}", API_PREFIX, self.name)
    }
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

pub const GET_LAST_VAULT: ContractMethod =
    ContractMethod::new("get_last_vault", "Get the most recently created vault", &[]);

const CLAIM_VAULT_FIELDS: &[Field] =
    &[Field::number("index", "index must be a number", "Index of the vault to claim")];

pub const CLAIM_VAULT: ContractMethod =
    ContractMethod::new("claim_vault", "Claim the tokens held in a vault", CLAIM_VAULT_FIELDS);

pub const GET_AUCTION_INFO: ContractMethod =
    ContractMethod::new("get_auction_info", "Get the state of the current auction", &[]);

pub const START_OR_PLACE_BID: ContractMethod = ContractMethod::new(
    "start_or_place_bid",
    "Start a new auction or place a bid on the running one",
    &[],
)
.with_gas(HEAVY_GAS)
.with_deposit(ONE_YOCTO);

pub const CLAIM_TOKENS: ContractMethod =
    ContractMethod::new("claim_tokens", "Claim the tokens won in a finished auction", &[])
        .with_gas(HEAVY_GAS);

const FT_BALANCE_OF_FIELDS: &[Field] =
    &[Field::string("account_id", "account_id is required", "Account to query")];

pub const FT_BALANCE_OF: ContractMethod = ContractMethod::new(
    "ft_balance_of",
    "Get the fungible token balance of an account",
    FT_BALANCE_OF_FIELDS,
);

const CHANGE_OWNER_FIELDS: &[Field] =
    &[Field::string("new_owner_id", "new_owner_id is required", "Account of the new owner")];

pub const CHANGE_OWNER: ContractMethod =
    ContractMethod::new("change_owner", "Transfer ownership of the contract", CHANGE_OWNER_FIELDS);

const FT_ON_TRANSFER_ERROR: &str = "sender_id, amount and msg are required";

const FT_ON_TRANSFER_FIELDS: &[Field] = &[
    Field::string("sender_id", FT_ON_TRANSFER_ERROR, "Account that sent the tokens"),
    Field::string("amount", FT_ON_TRANSFER_ERROR, "Amount transferred, as a decimal string"),
    Field::string("msg", FT_ON_TRANSFER_ERROR, "Message attached to the transfer"),
];

pub const FT_ON_TRANSFER: ContractMethod = ContractMethod::new(
    "ft_on_transfer",
    "Handle an incoming fungible token transfer",
    FT_ON_TRANSFER_FIELDS,
);

const GET_LIST_DEPOSITS_ERROR: &str = "from_index and limit must be numbers";

const GET_LIST_DEPOSITS_FIELDS: &[Field] = &[
    Field::number("from_index", GET_LIST_DEPOSITS_ERROR, "Index of the first deposit"),
    Field::number("limit", GET_LIST_DEPOSITS_ERROR, "Maximum number of deposits"),
];

pub const GET_LIST_DEPOSITS: ContractMethod = ContractMethod::new(
    "get_list_deposits",
    "List deposits with pagination",
    GET_LIST_DEPOSITS_FIELDS,
);

const GET_VAULTS_ERROR: &str = "start_index and limit must be numbers";

const GET_VAULTS_FIELDS: &[Field] = &[
    Field::number("start_index", GET_VAULTS_ERROR, "Index of the first vault"),
    Field::number("limit", GET_VAULTS_ERROR, "Maximum number of vaults"),
];

pub const GET_VAULTS: ContractMethod =
    ContractMethod::new("get_vaults", "List vaults with pagination", GET_VAULTS_FIELDS);

const NEW_FIELDS: &[Field] = &[
    Field::string("ft_token_id", "ft_token_id is required", "Fungible token contract"),
    Field::number(
        "countdown_period_withdraw",
        "countdown_period_withdraw must be a number",
        "Countdown before withdrawals are allowed",
    ),
    Field::string("owner_id", "owner_id is required", "Owner account"),
    Field::string("treasury_id", "treasury_id is required", "Treasury account"),
    Field::number("treasury_fee", "treasury_fee must be a number", "Fee paid to the treasury"),
];

pub const NEW: ContractMethod = ContractMethod::new("new", "Initialize the contract", NEW_FIELDS);

const SET_COUNTDOWN_PERIOD_WITHDRAW_FIELDS: &[Field] =
    &[Field::number("new_countdown", "new_countdown must be a number", "New countdown period")];

pub const SET_COUNTDOWN_PERIOD_WITHDRAW: ContractMethod = ContractMethod::new(
    "set_countdown_period_withdraw",
    "Change the withdrawal countdown period",
    SET_COUNTDOWN_PERIOD_WITHDRAW_FIELDS,
);

const SET_TREASURY_FIELDS: &[Field] =
    &[Field::string("new_treasury_id", "new_treasury_id is required", "New treasury account")];

pub const SET_TREASURY: ContractMethod =
    ContractMethod::new("set_treasury", "Change the treasury account", SET_TREASURY_FIELDS);

const AUCTION_METHODS: &[ContractMethod] = &[
    GET_LAST_VAULT,
    CLAIM_VAULT,
    GET_AUCTION_INFO,
    START_OR_PLACE_BID,
    CLAIM_TOKENS,
    FT_BALANCE_OF,
];

const VAULT_METHODS: &[ContractMethod] = &[
    CLAIM_VAULT,
    GET_AUCTION_INFO,
    START_OR_PLACE_BID,
    CLAIM_TOKENS,
    CHANGE_OWNER,
    FT_ON_TRANSFER,
    GET_LIST_DEPOSITS,
    GET_VAULTS,
    NEW,
    SET_COUNTDOWN_PERIOD_WITHDRAW,
    SET_TREASURY,
];

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Which endpoint table a server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Vault claiming, auction bidding and balance queries.
    Auction,
    /// Full vault contract surface, including admin methods and the plugin
    /// manifest.
    Vault,
}

impl Service {
    pub fn methods(&self) -> &'static [ContractMethod] {
        match self {
            Service::Auction => AUCTION_METHODS,
            Service::Vault => VAULT_METHODS,
        }
    }

    /// Look up a method of this service by name.
    pub fn method(&self, name: &str) -> Option<&'static ContractMethod> {
        self.methods().iter().find(|m| m.name == name)
    }

    /// Whether the service publishes `/.well-known/ai-plugin.json`.
    pub fn serves_manifest(&self) -> bool {
        matches!(self, Service::Vault)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Auction => "auction",
            Service::Vault => "vault",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
