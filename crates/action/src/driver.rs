//! State machine driving one operation from raw inputs to settlement.

use crate::{validate, Outcome, Request, Status};
use alloy_primitives::U256;
use token::writer::{Pending, Submit};
use tracing::{info, warn};

/// Drives operations against a submitter.
///
/// The decimals value is fixed at construction and reused for every
/// attempt in the session.
pub struct Driver<S> {
    submitter: S,
    decimals: u8,
}

impl<S: Submit> Driver<S> {
    pub const fn new(submitter: S, decimals: u8) -> Self {
        Self { submitter, decimals }
    }

    /// Run one attempt: validate, submit, await one confirmation.
    ///
    /// Every state transition is reported through `on_status`, starting
    /// from the resting [`Status::Idle`] and ending with
    /// [`Status::Settled`]; the settled outcome is also returned. The
    /// transaction hash is surfaced via [`Status::Confirming`] as soon as
    /// the submission lands, before the confirmation resolves.
    pub async fn run(
        &self,
        request: &Request,
        balance: U256,
        mut on_status: impl FnMut(&Status),
    ) -> Outcome {
        on_status(&Status::Idle);
        on_status(&Status::Validating);
        let call = match validate(request, self.decimals, balance) {
            Ok(call) => call,
            Err(e) => {
                return Self::settle(
                    Outcome::Failure {
                        message: e.to_string(),
                    },
                    &mut on_status,
                )
            }
        };

        on_status(&Status::Submitting);
        let pending = match self.submitter.submit(call).await {
            Ok(pending) => pending,
            Err(e) => {
                warn!(error = %e, "Submission failed");
                return Self::settle(
                    Outcome::Failure {
                        message: e.to_string(),
                    },
                    &mut on_status,
                );
            }
        };

        let hash = pending.hash();
        on_status(&Status::Confirming { hash });

        match pending.confirm().await {
            Ok(confirmed) => {
                info!(tx_hash = %confirmed.hash, "Operation confirmed");
                Self::settle(Outcome::Success { hash: confirmed.hash }, &mut on_status)
            }
            Err(e) => {
                warn!(error = %e, "Confirmation failed");
                Self::settle(
                    Outcome::Failure {
                        message: e.to_string(),
                    },
                    &mut on_status,
                )
            }
        }
    }

    fn settle(outcome: Outcome, on_status: &mut impl FnMut(&Status)) -> Outcome {
        on_status(&Status::Settled(outcome.clone()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, TxHash};
    use std::sync::Mutex;
    use token::{
        writer::{Confirmed, TokenCall},
        SubmitError,
    };

    const STUB_HASH: TxHash = TxHash::repeat_byte(0x11);
    const GOOD_ADDR: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    struct StubPending {
        fail_confirm: bool,
    }

    impl Pending for StubPending {
        fn hash(&self) -> TxHash {
            STUB_HASH
        }

        async fn confirm(self) -> Result<Confirmed, SubmitError> {
            if self.fail_confirm {
                return Err(SubmitError::Reverted { hash: STUB_HASH });
            }

            Ok(Confirmed {
                hash: STUB_HASH,
                block_number: Some(1),
                gas_used: 21_000,
                moved: None,
            })
        }
    }

    #[derive(Default)]
    struct StubSubmitter {
        calls: Mutex<Vec<TokenCall>>,
        fail_submit: bool,
        fail_confirm: bool,
    }

    impl Submit for StubSubmitter {
        type Pending = StubPending;

        async fn submit(&self, call: TokenCall) -> Result<StubPending, SubmitError> {
            self.calls.lock().unwrap().push(call);

            if self.fail_submit {
                return Err(SubmitError::Other("rpc unavailable".into()));
            }

            Ok(StubPending {
                fail_confirm: self.fail_confirm,
            })
        }
    }

    fn one_token() -> U256 {
        U256::from(1_000_000_000_000_000_000u64)
    }

    async fn run_collecting(
        submitter: StubSubmitter,
        request: Request,
    ) -> (StubSubmitter, Vec<Status>, Outcome) {
        let driver = Driver::new(submitter, 18);
        let mut seen = Vec::new();
        let outcome = driver
            .run(&request, one_token(), |status| seen.push(status.clone()))
            .await;
        (driver.submitter, seen, outcome)
    }

    #[tokio::test]
    async fn test_transfer_walks_the_machine() {
        let request = Request::Transfer {
            to: GOOD_ADDR.into(),
            amount: "0.5".into(),
        };

        let (submitter, seen, outcome) = run_collecting(StubSubmitter::default(), request).await;

        assert_eq!(
            seen,
            vec![
                Status::Idle,
                Status::Validating,
                Status::Submitting,
                Status::Confirming { hash: STUB_HASH },
                Status::Settled(Outcome::Success { hash: STUB_HASH }),
            ]
        );
        assert!(outcome.is_success());

        let calls = submitter.calls.into_inner().unwrap();
        assert_eq!(
            calls,
            vec![TokenCall::Transfer {
                to: GOOD_ADDR.parse::<Address>().unwrap(),
                amount: U256::from(500_000_000_000_000_000u64),
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_address_never_submits() {
        let request = Request::Transfer {
            to: "bogus".into(),
            amount: "1".into(),
        };

        let (submitter, seen, outcome) = run_collecting(StubSubmitter::default(), request).await;

        assert_eq!(seen.len(), 3);
        assert_eq!(seen[..2], [Status::Idle, Status::Validating]);
        assert!(matches!(seen[2], Status::Settled(Outcome::Failure { .. })));
        assert!(!outcome.is_success());
        assert!(submitter.calls.into_inner().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_burn_over_balance_never_submits() {
        let request = Request::Burn {
            amount: "2".into(),
        };

        let (submitter, _, outcome) = run_collecting(StubSubmitter::default(), request).await;

        let Outcome::Failure { message } = outcome else {
            panic!("expected failure");
        };
        assert!(message.contains("exceeds balance"));
        assert!(submitter.calls.into_inner().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_settles_without_hash() {
        let submitter = StubSubmitter {
            fail_submit: true,
            ..Default::default()
        };
        let request = Request::Burn {
            amount: "0.25".into(),
        };

        let (_, seen, outcome) = run_collecting(submitter, request).await;

        assert_eq!(seen.len(), 4);
        assert_eq!(seen[2], Status::Submitting);
        assert!(matches!(seen[3], Status::Settled(Outcome::Failure { .. })));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_confirm_failure_still_surfaces_hash() {
        let submitter = StubSubmitter {
            fail_confirm: true,
            ..Default::default()
        };
        let request = Request::Approve {
            spender: GOOD_ADDR.into(),
            amount: "10".into(),
        };

        let (_, seen, outcome) = run_collecting(submitter, request).await;

        assert_eq!(seen[3], Status::Confirming { hash: STUB_HASH });
        let Outcome::Failure { message } = outcome else {
            panic!("expected failure");
        };
        assert!(message.contains("reverted"));
    }
}
