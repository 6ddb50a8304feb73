// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Connecting, request routing, and the retry policy.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ferrogram_mtsender::{InvocationError, RpcError, SenderPool};
use ferrogram_session::{PeerCache, UpdateLedger, DEFAULT_DC};
use ferrogram_tl::{self as tl, Deserializable, RemoteCall, Serializable};
use log::{info, warn};
use tokio::time::{sleep, timeout};

use super::{AuthKeyDuplicatedPolicy, Client, ClientInner, Config};

impl Client {
    /// Connect to Telegram using the given configuration.
    ///
    /// The connection pool runs as a task on the current runtime; actual
    /// connections are dialed lazily with the first request to each
    /// datacenter.
    pub async fn connect(config: Config) -> Result<Self, InvocationError> {
        let Config {
            storage,
            api_id,
            params,
        } = config;

        let pool = SenderPool::with_params(
            Arc::clone(&storage),
            api_id,
            params.connection.clone(),
        );
        tokio::spawn(pool.runner.run());

        let ledger = match storage.load_update_state() {
            Some(state) => UpdateLedger::load(state, &storage.load_channel_states()),
            None => UpdateLedger::new(),
        };

        let peers = PeerCache::new(Arc::clone(&storage));

        let client = Client(Arc::new(ClientInner {
            handle: pool.handle,
            storage,
            params,
            ledger: Mutex::new(ledger),
            peers: Mutex::new(peers),
            updates_rx: tokio::sync::Mutex::new(pool.updates),
            update_queue: Mutex::new(VecDeque::new()),
            last_saved_state: Mutex::new(None),
            last_queue_limit_warn: Mutex::new(None),
            takeout_id: Mutex::new(None),
            diff_failures: Mutex::new(0),
        }));

        if client.0.params.catch_up {
            let mut ledger = client.0.ledger.lock().unwrap();
            if !ledger.is_empty() {
                info!("catching up on updates missed while offline");
                ledger.catch_up();
            }
        }

        Ok(client)
    }

    /// The datacenter requests go to unless told otherwise.
    pub fn home_dc_id(&self) -> i32 {
        self.0.storage.home_datacenter().unwrap_or(DEFAULT_DC)
    }

    /// Drop every connection and stop the pool. In-flight requests fail
    /// with [`InvocationError::Dropped`]; the session storage is left
    /// intact, so a new client can resume where this one stopped.
    pub fn disconnect(&self) {
        self.0.handle.quit();
    }

    /// Invoke a remote procedure call on the home datacenter.
    pub async fn invoke<R: RemoteCall>(&self, request: &R) -> Result<R::Return, InvocationError> {
        let dc_id = self.home_dc_id();
        self.invoke_in_dc(dc_id, request).await
    }

    /// Invoke a remote procedure call on a specific datacenter.
    pub async fn invoke_in_dc<R: RemoteCall>(
        &self,
        dc_id: i32,
        request: &R,
    ) -> Result<R::Return, InvocationError> {
        let body = Box::pin(self.invoke_raw(dc_id, request.to_bytes())).await?;
        R::Return::from_bytes(&body).map_err(InvocationError::from)
    }

    /// The retry loop every request goes through, implementing the
    /// client-side error policy:
    ///
    /// * flood waits below the threshold are slept through;
    /// * migration errors re-route (and re-home, except for files);
    /// * server errors are retried a few times with a growing pause;
    /// * timeouts are retried once;
    /// * everything else is the caller's problem.
    pub(crate) async fn invoke_raw(
        &self,
        dc_id: i32,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, InvocationError> {
        let mut dc_id = dc_id;
        let mut server_errors = 0;
        let mut timed_out = false;

        loop {
            let wire_body = self.wrap_takeout(&body);
            let result = timeout(
                self.0.params.request_timeout,
                self.0.handle.invoke_in_dc(dc_id, wire_body),
            )
            .await;

            let error = match result {
                Ok(Ok(response)) => break Ok(response),
                Ok(Err(error)) => error,
                Err(_elapsed) => {
                    // The sender discards the response of the abandoned
                    // attempt whenever it arrives.
                    if timed_out {
                        break Err(InvocationError::Timeout);
                    }
                    warn!("request timed out; retrying once");
                    timed_out = true;
                    continue;
                }
            };

            let rpc = match error {
                InvocationError::Rpc(rpc) => rpc,
                other => break Err(other),
            };

            if is_flood(&rpc) {
                match flood_wait_duration(&rpc, self.0.params.flood_sleep_threshold) {
                    Some(delay) => {
                        info!("sleeping {}s on {}", delay.as_secs(), rpc.name);
                        sleep(delay).await;
                        continue;
                    }
                    None => break Err(InvocationError::Rpc(rpc)),
                }
            }

            if rpc.is("*_MIGRATE") {
                let target = match rpc.value {
                    Some(dc) => dc as i32,
                    None => break Err(InvocationError::Rpc(rpc)),
                };
                dc_id = self.handle_migrate(&rpc.name, dc_id, target).await?;
                continue;
            }

            if rpc.is("AUTH_KEY_DUPLICATED") {
                match self.0.params.auth_key_duplicated {
                    AuthKeyDuplicatedPolicy::Rekey => {
                        warn!("authorization key duplicated; generating a fresh one");
                        self.0.storage.clear_auth_key(dc_id);
                        self.0.handle.disconnect_from_dc(dc_id);
                        continue;
                    }
                    AuthKeyDuplicatedPolicy::Surface => break Err(InvocationError::Rpc(rpc)),
                }
            }

            if (500..600).contains(&rpc.code) {
                server_errors += 1;
                if server_errors > self.0.params.server_error_retries {
                    break Err(InvocationError::Rpc(rpc));
                }
                warn!("server error {}; retry {server_errors}", rpc.name);
                sleep(Duration::from_secs(server_errors as u64)).await;
                continue;
            }

            break Err(InvocationError::Rpc(rpc));
        }
    }

    fn wrap_takeout(&self, body: &[u8]) -> Vec<u8> {
        match *self.0.takeout_id.lock().unwrap() {
            Some(takeout_id) => tl::functions::InvokeWithTakeout {
                takeout_id,
                query: tl::functions::Raw {
                    body: body.to_vec(),
                },
            }
            .to_bytes(),
            None => body.to_vec(),
        }
    }

    /// Act on a `*_MIGRATE_n` error: connect to the target datacenter
    /// (transferring the logged-in authorization when there is one), and
    /// return the datacenter the request should be retried on.
    ///
    /// `FILE_MIGRATE` only re-routes the one request; the other kinds mean
    /// the account actually lives elsewhere, so the session is re-homed.
    async fn handle_migrate(
        &self,
        kind: &str,
        current_dc: i32,
        target_dc: i32,
    ) -> Result<i32, InvocationError> {
        info!("{kind} to dc {target_dc} (from {current_dc})");

        let signed_in = self.0.storage.load_identity().is_some();
        let needs_auth = self.0.storage.load_auth_key(target_dc).is_none();
        if signed_in && needs_auth {
            // The new key is generated by the pool on first contact; the
            // login state must then be carried over explicitly.
            self.transfer_authorization(current_dc, target_dc).await?;
        }

        if kind != "FILE_MIGRATE" {
            self.0.storage.set_home_datacenter(target_dc);
            self.0.handle.disconnect_from_dc(current_dc);
        }

        Ok(target_dc)
    }
}

fn is_flood(rpc: &RpcError) -> bool {
    rpc.is("FLOOD_WAIT") || rpc.is("FLOOD_TEST_PHONE_WAIT") || rpc.is("SLOWMODE_WAIT")
}

/// How long to sleep before retrying a flood-related error, or `None`
/// when the wait is too long and the error should reach the caller.
fn flood_wait_duration(rpc: &RpcError, threshold: u32) -> Option<Duration> {
    let seconds = rpc.value.unwrap_or(0);
    if seconds <= threshold {
        Some(Duration::from_secs(seconds as u64))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flood(seconds: u32) -> RpcError {
        RpcError {
            code: 420,
            name: "FLOOD_WAIT".into(),
            value: Some(seconds),
            caused_by: None,
        }
    }

    #[test]
    fn short_floods_sleep_at_least_the_requested_time() {
        let rpc = flood(10);
        assert!(is_flood(&rpc));
        assert_eq!(
            flood_wait_duration(&rpc, 30),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn long_floods_surface_to_the_caller() {
        let rpc = flood(60);
        assert!(is_flood(&rpc));
        assert_eq!(flood_wait_duration(&rpc, 30), None);
    }

    #[test]
    fn migrations_carry_the_target_dc() {
        let rpc = RpcError::from(ferrogram_tl::types::RpcError {
            error_code: 303,
            error_message: "PHONE_MIGRATE_5".into(),
        });
        assert!(rpc.is("*_MIGRATE"));
        assert!(!is_flood(&rpc));
        assert_eq!(rpc.value, Some(5));
    }
}
