//! Mock world transport for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::traits::{TransportError, WorldTransport};
use crate::types::{CommandPayload, CommandReceipt, CommandStatus, TransactionId};

/// Mock transport for testing without network.
///
/// Records every submitted payload in-memory and can be scripted to fail
/// the next N submissions.
#[derive(Clone)]
pub struct MockWorldClient {
    submissions: Arc<Mutex<Vec<CommandPayload>>>,
    transaction_counter: Arc<Mutex<u64>>,
    failures_remaining: Arc<Mutex<u32>>,
}

impl MockWorldClient {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            transaction_counter: Arc::new(Mutex::new(0)),
            failures_remaining: Arc::new(Mutex::new(0)),
        }
    }

    /// Script the next `count` submissions to fail with a transaction error.
    pub fn fail_next(&self, count: u32) {
        *self.failures_remaining.lock().unwrap() = count;
    }

    /// Payloads submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<CommandPayload> {
        self.submissions.lock().unwrap().clone()
    }

    fn next_tx_id(&self) -> TransactionId {
        let mut counter = self.transaction_counter.lock().unwrap();
        *counter += 1;
        TransactionId::from_bytes(counter.to_le_bytes().to_vec())
    }
}

impl Default for MockWorldClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorldTransport for MockWorldClient {
    async fn submit(&self, payload: CommandPayload) -> Result<CommandReceipt, TransportError> {
        {
            let mut failures = self.failures_remaining.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError::TransactionFailed(format!(
                    "scripted failure for '{}'",
                    payload.program
                )));
            }
        }

        self.submissions.lock().unwrap().push(payload);

        Ok(CommandReceipt {
            transaction_id: self.next_tx_id(),
            gas_used: 1000, // Mock gas cost
            status: CommandStatus::Confirmed { block_height: 1 },
        })
    }

    fn name(&self) -> &str {
        "MockWorld"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_world_client_records_submissions() {
        let client = MockWorldClient::new();

        let receipt = client
            .submit(CommandPayload::new("actor-1", "move east east"))
            .await
            .unwrap();
        assert_eq!(receipt.gas_used, 1000);
        assert_eq!(receipt.status, CommandStatus::Confirmed { block_height: 1 });

        let submissions = client.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].program, "move east east");

        assert_eq!(client.name(), "MockWorld");
    }

    #[tokio::test]
    async fn test_scripted_failures_are_consumed_in_order() {
        let client = MockWorldClient::new();
        client.fail_next(1);

        let error = client
            .submit(CommandPayload::new("actor-1", "move north"))
            .await
            .unwrap_err();
        assert!(matches!(error, TransportError::TransactionFailed(_)));

        // Failure budget spent; the next submission succeeds and only it
        // is recorded.
        client
            .submit(CommandPayload::new("actor-1", "move south"))
            .await
            .unwrap();
        let submissions = client.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].program, "move south");
    }
}
