//! End-to-end operation scenarios through the public driver API, with a
//! recording submitter in place of the RPC write client.

use action::{Driver, Outcome, Request, Status};
use alloy_primitives::{Address, TxHash, U256};
use std::sync::{Arc, Mutex};
use token::{
    writer::{Confirmed, Pending, Submit, TokenCall},
    SubmitError,
};

const HASH: TxHash = TxHash::repeat_byte(0x42);
const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

struct RecordedPending;

impl Pending for RecordedPending {
    fn hash(&self) -> TxHash {
        HASH
    }

    async fn confirm(self) -> Result<Confirmed, SubmitError> {
        Ok(Confirmed {
            hash: HASH,
            block_number: Some(7),
            gas_used: 51_000,
            moved: Some(U256::from(500_000_000_000_000_000u64)),
        })
    }
}

#[derive(Clone, Default)]
struct RecordingSubmitter {
    calls: Arc<Mutex<Vec<TokenCall>>>,
}

impl RecordingSubmitter {
    fn recorded(&self) -> Vec<TokenCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Submit for RecordingSubmitter {
    type Pending = RecordedPending;

    async fn submit(&self, call: TokenCall) -> Result<RecordedPending, SubmitError> {
        self.calls.lock().unwrap().push(call);
        Ok(RecordedPending)
    }
}

/// One token at 18 decimals.
fn balance() -> U256 {
    U256::from(1_000_000_000_000_000_000u64)
}

#[tokio::test]
async fn test_transfer_half_a_token_submits_once_in_base_units() {
    let submitter = RecordingSubmitter::default();
    let driver = Driver::new(submitter.clone(), 18);
    let request = Request::Transfer {
        to: RECIPIENT.into(),
        amount: "0.5".into(),
    };

    let mut hashes_seen = Vec::new();
    let outcome = driver
        .run(&request, balance(), |status| {
            if let Status::Confirming { hash } = status {
                hashes_seen.push(*hash);
            }
        })
        .await;

    assert_eq!(outcome, Outcome::Success { hash: HASH });
    // Hash surfaced exactly once, before settlement.
    assert_eq!(hashes_seen, vec![HASH]);

    assert_eq!(
        submitter.recorded(),
        vec![TokenCall::Transfer {
            to: RECIPIENT.parse::<Address>().unwrap(),
            amount: U256::from(500_000_000_000_000_000u64),
        }]
    );
}

#[tokio::test]
async fn test_burn_beyond_balance_never_reaches_submitter() {
    let submitter = RecordingSubmitter::default();
    let driver = Driver::new(submitter.clone(), 18);
    let request = Request::Burn {
        amount: "1.000000000000000001".into(),
    };

    let outcome = driver.run(&request, balance(), |_| {}).await;

    assert!(!outcome.is_success());
    assert!(submitter.recorded().is_empty());
}

#[tokio::test]
async fn test_approve_then_exact_allowance_amount() {
    let submitter = RecordingSubmitter::default();
    let driver = Driver::new(submitter.clone(), 18);
    let request = Request::Approve {
        spender: RECIPIENT.into(),
        amount: "10".into(),
    };

    let outcome = driver.run(&request, balance(), |_| {}).await;

    assert!(outcome.is_success());
    assert_eq!(
        submitter.recorded(),
        vec![TokenCall::Approve {
            spender: RECIPIENT.parse::<Address>().unwrap(),
            amount: U256::from(10u64) * U256::from(10u64).pow(U256::from(18)),
        }]
    );
}

#[tokio::test]
async fn test_failure_leaves_request_reusable() {
    let driver = Driver::new(RecordingSubmitter::default(), 18);
    let request = Request::Approve {
        spender: "nonsense".into(),
        amount: "10".into(),
    };

    let first = driver.run(&request, balance(), |_| {}).await;
    assert!(!first.is_success());

    // Inputs are preserved on failure; the same request can be corrected
    // and re-run. Re-running unchanged settles the same way.
    let second = driver.run(&request, balance(), |_| {}).await;
    assert_eq!(first, second);
}
