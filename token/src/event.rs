use reject_token_common::crypto::Address;
use serde::Serialize;

/// Notification recorded by a successful call.
///
/// Events are staged together with the state writes of a call and only
/// become visible once the call commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Tokens moved; `from` is the zero address for the construction mint
    Transfer {
        from: Address,
        to: Address,
        amount: u64,
    },
    /// Allowance of `spender` over `owner`'s tokens is now `amount`
    Approval {
        owner: Address,
        spender: Address,
        amount: u64,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
}

/// Destination for events raised while a call executes
pub trait EventSink {
    fn emit(&mut self, event: TokenEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = TokenEvent::Transfer {
            from: Address::zero(),
            to: Address::new([1u8; 32]),
            amount: 100,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "transfer");
        assert_eq!(json["amount"], 100);
        assert_eq!(json["from"], "00".repeat(32));
    }
}
