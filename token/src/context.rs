use reject_token_common::crypto::Address;

/// Who is calling and how much native currency rides along with the call.
///
/// Identity is already authenticated by the host; `value` is the amount
/// attached to the call, which every entry point of the token refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: u64,
}

impl CallContext {
    /// Plain call with no value attached
    pub fn new(caller: Address) -> Self {
        Self { caller, value: 0 }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

impl From<Address> for CallContext {
    fn from(caller: Address) -> Self {
        Self::new(caller)
    }
}
