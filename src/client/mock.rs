//! Scriptable in-memory chain client for tests.

use std::{
    collections::HashMap,
    ops::Range,
    sync::Mutex,
    time::Duration,
};

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use rand::Rng;

use super::ChainClient;
use crate::{codec, errors::NetworkError};

type Key = (Address, [u8; 4]);

#[derive(Default)]
struct Calls {
    started: HashMap<Key, usize>,
    completed: HashMap<Key, usize>,
    block_number_started: usize,
    block_number_completed: usize,
}

/// Responds to `(target, selector)` pairs from a fixed table and records
/// every call. A call is only counted as completed once its simulated
/// latency has elapsed, so dropped calls stay visible.
#[derive(Default)]
pub(crate) struct MockChainClient {
    responses: HashMap<Key, Result<Bytes, NetworkError>>,
    latencies: HashMap<Key, Duration>,
    block_number: Option<Result<u64, NetworkError>>,
    block_number_latency: Duration,
    jitter: Option<Range<u64>>,
    calls: Mutex<Calls>,
}

impl MockChainClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, target: Address, signature: &str, payload: Vec<u8>) -> Self {
        self.responses.insert(
            (target, codec::selector_of(signature)),
            Ok(Bytes::from(payload)),
        );
        self
    }

    pub(crate) fn respond_address(self, target: Address, signature: &str, value: Address) -> Self {
        self.respond(target, signature, codec::encode_address_word(value).to_vec())
    }

    pub(crate) fn respond_uint(self, target: Address, signature: &str, value: U256) -> Self {
        self.respond(target, signature, codec::encode_uint_word(value).to_vec())
    }

    pub(crate) fn respond_string(self, target: Address, signature: &str, value: &str) -> Self {
        self.respond(target, signature, codec::encode_dynamic_string(value))
    }

    pub(crate) fn fail(mut self, target: Address, signature: &str, message: &str) -> Self {
        self.responses.insert(
            (target, codec::selector_of(signature)),
            Err(NetworkError::new(message)),
        );
        self
    }

    pub(crate) fn delay(mut self, target: Address, signature: &str, latency: Duration) -> Self {
        self.latencies
            .insert((target, codec::selector_of(signature)), latency);
        self
    }

    pub(crate) fn with_block_number(mut self, height: u64) -> Self {
        self.block_number = Some(Ok(height));
        self
    }

    pub(crate) fn fail_block_number(mut self, message: &str) -> Self {
        self.block_number = Some(Err(NetworkError::new(message)));
        self
    }

    pub(crate) fn delay_block_number(mut self, latency: Duration) -> Self {
        self.block_number_latency = latency;
        self
    }

    /// Add a random latency, in microseconds, to every call.
    pub(crate) fn with_jitter(mut self, micros: Range<u64>) -> Self {
        self.jitter = Some(micros);
        self
    }

    pub(crate) fn calls_started(&self, target: Address, signature: &str) -> usize {
        let key = (target, codec::selector_of(signature));
        self.calls.lock().unwrap().started.get(&key).copied().unwrap_or(0)
    }

    pub(crate) fn calls_completed(&self, target: Address, signature: &str) -> usize {
        let key = (target, codec::selector_of(signature));
        self.calls.lock().unwrap().completed.get(&key).copied().unwrap_or(0)
    }

    /// Contract calls to `signature` on any target.
    pub(crate) fn calls_to(&self, signature: &str) -> usize {
        let selector = codec::selector_of(signature);
        self.calls
            .lock()
            .unwrap()
            .started
            .iter()
            .filter(|((_, s), _)| *s == selector)
            .map(|(_, count)| count)
            .sum()
    }

    pub(crate) fn block_number_calls(&self) -> usize {
        self.calls.lock().unwrap().block_number_started
    }

    pub(crate) fn block_number_completed(&self) -> usize {
        self.calls.lock().unwrap().block_number_completed
    }

    pub(crate) fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.started.values().sum::<usize>() + calls.block_number_started
    }

    fn jitter(&self) -> Duration {
        match &self.jitter {
            Some(range) if !range.is_empty() => {
                Duration::from_micros(rand::thread_rng().gen_range(range.clone()))
            },
            _ => Duration::ZERO,
        }
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn block_number(&self) -> Result<u64, NetworkError> {
        self.calls.lock().unwrap().block_number_started += 1;

        let latency = self.block_number_latency + self.jitter();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.calls.lock().unwrap().block_number_completed += 1;

        self.block_number
            .clone()
            .unwrap_or_else(|| Err(NetworkError::new("no block number scripted")))
    }

    async fn call_contract(&self, to: Address, calldata: Bytes) -> Result<Bytes, NetworkError> {
        let selector: [u8; 4] = calldata
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| NetworkError::new("calldata shorter than a selector"))?;
        let key = (to, selector);

        *self.calls.lock().unwrap().started.entry(key).or_default() += 1;

        let latency = self.latencies.get(&key).copied().unwrap_or_default() + self.jitter();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        *self.calls.lock().unwrap().completed.entry(key).or_default() += 1;

        self.responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(NetworkError::new(format!("execution reverted: {to}"))))
    }
}
