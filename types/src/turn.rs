//! Turn ledger records.
//!
//! A turn is one ledgered trade attempt: who traded what where, the balances
//! observed around the trade, and which random events fired. Every economic
//! field is an [`Amount`] so chain-scale balances survive storage, JSON, and
//! GraphQL without rounding; fields the indexer has not backfilled are absent
//! rather than zero.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// One completed turn in the trading game.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, SimpleObject)]
pub struct Turn {
    pub user_id: String,
    pub location_id: String,
    pub item_id: String,
    /// `true` for a buy, `false` for a sell.
    pub buy_or_sell: bool,
    pub amount_to_give: Option<Amount>,
    pub user_combat_stats: Vec<i64>,
    pub drug_lord_combat_stats: Vec<i64>,
    pub trade_occurs: bool,

    // Item and money balances sampled before the trade, after the trade, and
    // after any random event settled.
    pub user_pre_trade_item: Option<Amount>,
    pub user_post_trade_pre_event_item: Option<Amount>,
    pub user_post_trade_post_event_item: Option<Amount>,
    pub user_pre_trade_money: Option<Amount>,
    pub user_post_trade_pre_event_money: Option<Amount>,
    pub user_post_trade_post_event_money: Option<Amount>,
    pub market_pre_trade_item: Option<Amount>,
    pub market_post_trade_pre_event_item: Option<Amount>,
    pub market_post_trade_post_event_item: Option<Amount>,
    pub market_pre_trade_money: Option<Amount>,
    pub market_post_trade_pre_event_money: Option<Amount>,
    pub market_post_trade_post_event_money: Option<Amount>,

    // Random events rolled during the turn.
    pub dealer_dash: bool,
    pub wrangle_dashed_dealer: bool,
    pub mugging: bool,
    pub run_from_mugging: bool,
    pub gang_war: bool,
    pub defend_gang_war: bool,
    pub cop_raid: bool,
    pub bribe_cops: bool,
    pub find_item: bool,
    pub local_shipment: bool,
    pub warehouse_seizure: bool,

    /// Unix timestamp (seconds) at which the turn was recorded.
    pub created_at: u64,
}

/// Sums `amount_to_give` across turns. Absent amounts count as zero, so a
/// partially backfilled ledger still totals the turns it has.
pub fn total_amount_traded<'a, I>(turns: I) -> Amount
where
    I: IntoIterator<Item = &'a Turn>,
{
    turns
        .into_iter()
        .filter_map(|turn| turn.amount_to_give.as_ref())
        .sum()
}
