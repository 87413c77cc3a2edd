//! Property-based tests for the RejectToken ledger
//!
//! Random call sequences are replayed against a token. Properties tested:
//! - Supply conservation (total supply equals the sum of balances)
//! - Failed calls leave no trace (balances, allowances, owner, events)
//! - Allowances only move through approve, the adjustments and transfer-from

use proptest::prelude::*;
use reject_token::{Address, CallContext, RejectToken, TokenError};

const ACCOUNTS: u8 = 4;

/// Index 0 maps to the zero address so recipients can be invalid
fn account(n: u8) -> Address {
    if n == 0 {
        Address::zero()
    } else {
        Address::new([n; 32])
    }
}

#[derive(Debug, Clone)]
enum Op {
    Transfer { from: u8, to: u8, amount: u64 },
    Approve { owner: u8, spender: u8, amount: u64 },
    TransferFrom { spender: u8, owner: u8, to: u8, amount: u64 },
    IncreaseApproval { owner: u8, spender: u8, delta: u64 },
    DecreaseApproval { owner: u8, spender: u8, delta: u64 },
    TransferOwnership { caller: u8, new_owner: u8 },
    Funded { caller: u8, to: u8, amount: u64, value: u64 },
}

fn amount() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..300, Just(u64::MAX)]
}

fn op() -> impl Strategy<Value = Op> {
    let who = 0u8..ACCOUNTS;
    prop_oneof![
        (who.clone(), who.clone(), amount()).prop_map(|(from, to, amount)| Op::Transfer { from, to, amount }),
        (who.clone(), who.clone(), amount()).prop_map(|(owner, spender, amount)| Op::Approve {
            owner,
            spender,
            amount
        }),
        (who.clone(), who.clone(), who.clone(), amount()).prop_map(|(spender, owner, to, amount)| {
            Op::TransferFrom {
                spender,
                owner,
                to,
                amount,
            }
        }),
        (who.clone(), who.clone(), amount()).prop_map(|(owner, spender, delta)| Op::IncreaseApproval {
            owner,
            spender,
            delta
        }),
        (who.clone(), who.clone(), amount()).prop_map(|(owner, spender, delta)| Op::DecreaseApproval {
            owner,
            spender,
            delta
        }),
        (who.clone(), who.clone()).prop_map(|(caller, new_owner)| Op::TransferOwnership { caller, new_owner }),
        (who.clone(), who, amount(), 1u64..1000).prop_map(|(caller, to, amount, value)| Op::Funded {
            caller,
            to,
            amount,
            value
        }),
    ]
}

fn apply(token: &mut RejectToken, op: &Op) -> Result<(), TokenError> {
    let ctx = |n: u8| CallContext::new(account(n));
    match *op {
        Op::Transfer { from, to, amount } => token.transfer(&ctx(from), &account(to), amount),
        Op::Approve { owner, spender, amount } => token.approve(&ctx(owner), &account(spender), amount),
        Op::TransferFrom {
            spender,
            owner,
            to,
            amount,
        } => token.transfer_from(&ctx(spender), &account(owner), &account(to), amount),
        Op::IncreaseApproval { owner, spender, delta } => token
            .increase_approval(&ctx(owner), &account(spender), delta)
            .map(|_| ()),
        Op::DecreaseApproval { owner, spender, delta } => token
            .decrease_approval(&ctx(owner), &account(spender), delta)
            .map(|_| ()),
        Op::TransferOwnership { caller, new_owner } => token.transfer_ownership(&ctx(caller), &account(new_owner)),
        Op::Funded {
            caller,
            to,
            amount,
            value,
        } => token.transfer(&ctx(caller).with_value(value), &account(to), amount),
    }
}

/// Everything a call could observably change
#[derive(Debug, PartialEq, Eq)]
struct Observed {
    supply: u64,
    owner: Address,
    balances: Vec<u64>,
    allowances: Vec<u64>,
    events: usize,
}

fn observe(token: &RejectToken) -> Observed {
    let all = 0..ACCOUNTS;
    Observed {
        supply: token.total_supply(),
        owner: token.owner(),
        balances: all.clone().map(|n| token.balance_of(&account(n))).collect(),
        allowances: all
            .clone()
            .flat_map(|o| all.clone().map(move |s| (o, s)))
            .map(|(o, s)| token.allowance(&account(o), &account(s)))
            .collect(),
        events: token.events().len(),
    }
}

proptest! {
    #[test]
    fn test_supply_conservation(
        supply in 0u64..1_000,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut token = RejectToken::with_supply(&CallContext::new(account(1)), account(9), account(1), supply).unwrap();

        for op in &ops {
            let _ = apply(&mut token, op);

            // INVARIANT: No tokens created or destroyed after construction
            prop_assert_eq!(token.total_supply(), supply);
            prop_assert_eq!(token.state().sum_of_balances(), supply as u128);
        }
    }
}

proptest! {
    #[test]
    fn test_failed_calls_leave_no_trace(
        supply in 0u64..1_000,
        ops in prop::collection::vec(op(), 1..60),
    ) {
        let mut token = RejectToken::with_supply(&CallContext::new(account(1)), account(9), account(1), supply).unwrap();

        for op in &ops {
            let before = observe(&token);
            match apply(&mut token, op) {
                Err(_) => prop_assert_eq!(observe(&token), before),
                Ok(()) => prop_assert!(observe(&token).events > before.events),
            }
        }
    }
}

proptest! {
    #[test]
    fn test_funded_calls_always_rejected(
        ops in prop::collection::vec(op(), 1..30),
        value in 1u64..=u64::MAX,
    ) {
        let mut token = RejectToken::with_supply(&CallContext::new(account(1)), account(9), account(1), 500).unwrap();

        for op in &ops {
            let result = match *op {
                Op::Transfer { from, to, amount } => {
                    token.transfer(&CallContext::new(account(from)).with_value(value), &account(to), amount)
                }
                Op::Approve { owner, spender, amount } => {
                    token.approve(&CallContext::new(account(owner)).with_value(value), &account(spender), amount)
                }
                _ => continue,
            };
            prop_assert_eq!(result, Err(TokenError::UnexpectedPayment(value)));
        }
    }
}

proptest! {
    #[test]
    fn test_transfer_from_consumes_exact_allowance(
        approved in 0u64..500,
        amount in 0u64..500,
    ) {
        let mut token = RejectToken::with_supply(&CallContext::new(account(1)), account(9), account(1), 1_000).unwrap();
        token.approve(&CallContext::new(account(1)), &account(2), approved).unwrap();

        let result = token.transfer_from(&CallContext::new(account(2)), &account(1), &account(3), amount);

        if amount <= approved {
            prop_assert!(result.is_ok());
            prop_assert_eq!(token.allowance(&account(1), &account(2)), approved - amount);
            prop_assert_eq!(token.balance_of(&account(3)), amount);
        } else {
            prop_assert_eq!(result, Err(TokenError::InsufficientAllowance { need: amount, have: approved }));
            prop_assert_eq!(token.allowance(&account(1), &account(2)), approved);
            prop_assert_eq!(token.balance_of(&account(3)), 0);
        }
    }
}
