// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use ferrogram_crypto::HeadroomBuffer;
use ferrogram_mtproto::mtp::{self, BadMessage, Incoming, Mtp};
use ferrogram_mtproto::transport::{self, Transport};
use ferrogram_mtproto::{handshake, MsgId};
use ferrogram_session::UpdatesLike;
use ferrogram_tl::{self as tl, Deserializable, RemoteCall, Serializable};
use log::{debug, error, info, trace, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::time::{sleep, sleep_until, Instant};

use crate::errors::{InvocationError, ReadError, RpcError};
use crate::net::{NetStream, ServerAddr};
use crate::reconnection::{NoReconnect, ReconnectionPolicy};

/// The maximum amount of data to send or receive at once. The server
/// closes the connection around a megabyte, plus some slack for the
/// transport envelopes. A fixed bound also means invalid incoming lengths
/// can never cause unbounded allocations.
const MAXIMUM_DATA: usize = (1024 * 1024) + (8 * 1024);

/// Leading space reserved in the write buffer so headers can be prepended
/// without moving the payload.
const LEADING_BUFFER_SPACE: usize = mtp::MAX_TRANSPORT_HEADER_LEN
    + mtp::ENCRYPTED_ENVELOPE_LEN
    + mtp::SALT_SESSION_HEADER_LEN
    + mtp::MESSAGE_CONTAINER_HEADER_LEN;

/// Every how often a keepalive ping is sent.
const PING_DELAY: Duration = Duration::from_secs(60);

/// After how many seconds of silence the server should drop the
/// connection. Pings keep being sent well within this window, so a drop
/// means the messages stopped getting through.
const NO_PING_DISCONNECT: i32 = 75;

/// Generate a "random" identifier for pings.
pub(crate) fn generate_random_id() -> i64 {
    static LAST_ID: AtomicI64 = AtomicI64::new(0);

    while LAST_ID.load(Ordering::SeqCst) == 0 {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("system time is before epoch")
            .as_nanos() as i64;

        let _ = LAST_ID.compare_exchange(0, now, Ordering::SeqCst, Ordering::SeqCst);
    }

    LAST_ID.fetch_add(1, Ordering::SeqCst)
}

/// A request that was handed to the sender, along with where it stands.
struct Request {
    body: Vec<u8>,
    state: RequestState,
    result: oneshot::Sender<Result<Vec<u8>, InvocationError>>,
}

/// The identifier of a serialized request, plus the identifier of the
/// container it was sent in (itself when no container was used). Server
/// notifications may reference either.
#[derive(Clone, Debug)]
struct MsgIdPair {
    msg_id: MsgId,
    container_msg_id: MsgId,
}

impl MsgIdPair {
    fn new(msg_id: MsgId) -> Self {
        Self {
            msg_id,
            container_msg_id: msg_id,
        }
    }
}

enum RequestState {
    NotSerialized,
    Serialized(MsgIdPair),
    Sent(MsgIdPair),
}

/// Owns one connection to one datacenter: the byte stream, the transport
/// framing, the protocol state, and the table of in-flight requests.
///
/// Stepping the sender drives reads, writes and the keepalive ping
/// concurrently; requests are matched back to their completion handles as
/// results arrive, after any resends the server demands.
pub struct Sender<T: Transport, M: Mtp> {
    stream: NetStream,
    transport: T,
    mtp: M,
    addr: ServerAddr,
    requests: Vec<Request>,
    next_ping: Instant,
    reconnection_policy: Arc<dyn ReconnectionPolicy>,

    read_buffer: Vec<u8>,
    read_tail: usize,
    write_buffer: HeadroomBuffer<u8>,
    write_head: usize,
}

impl<T: Transport, M: Mtp> Sender<T, M> {
    /// Open a new connection using the given transport and protocol state.
    ///
    /// This performs no request of its own, not even `initConnection`.
    pub async fn connect(transport: T, mtp: M, addr: ServerAddr) -> Result<Self, io::Error> {
        let stream = NetStream::connect(&addr).await?;
        Ok(Self {
            stream,
            transport,
            mtp,
            addr,
            requests: vec![],
            next_ping: Instant::now() + PING_DELAY,
            reconnection_policy: Arc::new(NoReconnect),

            read_buffer: vec![0; MAXIMUM_DATA],
            read_tail: 0,
            write_buffer: HeadroomBuffer::with_capacity(MAXIMUM_DATA, LEADING_BUFFER_SPACE),
            write_head: 0,
        })
    }

    /// Replace the reconnection policy applied on network errors.
    pub fn set_reconnection_policy(&mut self, policy: Arc<dyn ReconnectionPolicy>) {
        self.reconnection_policy = policy;
    }

    /// Enqueue the request and step the sender until its response arrives.
    pub async fn invoke<R: RemoteCall>(
        &mut self,
        request: &R,
    ) -> Result<R::Return, InvocationError> {
        let (tx, rx) = oneshot::channel();
        self.enqueue_body(request.to_bytes(), tx);
        self.step_until_receive(rx)
            .await
            .and_then(|body| R::Return::from_bytes(&body).map_err(|err| err.into()))
    }

    /// Enqueue an already-serialized request. The response body (or error)
    /// is delivered through the given channel; dropping the receiving end
    /// cancels the request, and its eventual response is discarded.
    pub fn enqueue_body(
        &mut self,
        body: Vec<u8>,
        tx: oneshot::Sender<Result<Vec<u8>, InvocationError>>,
    ) {
        assert!(body.len() >= 4);
        let req_id = u32::from_le_bytes(body[..4].try_into().unwrap());
        debug!("enqueueing request {} to be serialized", tl::name_for_id(req_id));

        self.requests.push(Request {
            body,
            state: RequestState::NotSerialized,
            result: tx,
        });
    }

    async fn step_until_receive(
        &mut self,
        mut rx: oneshot::Receiver<Result<Vec<u8>, InvocationError>>,
    ) -> Result<Vec<u8>, InvocationError> {
        loop {
            self.step().await?;
            match rx.try_recv() {
                Ok(x) => break x,
                Err(TryRecvError::Empty) => continue,
                Err(TryRecvError::Closed) => {
                    panic!("request channel dropped before receiving a result")
                }
            }
        }
    }

    /// Drive network events once: read, write, or handle the ping timer,
    /// whichever is ready first.
    ///
    /// Updates received during the step, if any, are returned.
    ///
    /// Network errors are subjected to the reconnection policy before
    /// being propagated; a propagated error means the sender is dead.
    pub async fn step(&mut self) -> Result<Vec<UpdatesLike>, ReadError> {
        match self.step_once().await {
            Ok(updates) => Ok(updates),
            Err(err) => {
                warn!("network step failed: {err}");
                match self.try_reconnect().await {
                    Ok(()) => Ok(vec![UpdatesLike::Reconnection]),
                    Err(()) => {
                        self.fail_all_requests(&err);
                        Err(err)
                    }
                }
            }
        }
    }

    async fn step_once(&mut self) -> Result<Vec<UpdatesLike>, ReadError> {
        self.try_fill_write();

        let write_len = self.write_buffer.len() - self.write_head;
        trace!("stepping with {write_len} bytes pending to send");

        let (mut reader, mut writer) = self.stream.split();
        let sleep = sleep_until(self.next_ping);

        tokio::select! {
            n = reader.read(&mut self.read_buffer[self.read_tail..]) => {
                let n = n?;
                self.on_net_read(n)
            }
            n = writer.write(&self.write_buffer[self.write_head..]), if !self.write_buffer.is_empty() => {
                let n = n?;
                self.on_net_write(n);
                Ok(Vec::new())
            }
            _ = sleep => {
                self.on_ping_timeout();
                Ok(Vec::new())
            }
        }
    }

    /// Serialize pending requests into the write buffer, unless a write is
    /// already in progress.
    fn try_fill_write(&mut self) {
        if !self.write_buffer.is_empty() {
            return;
        }

        for request in self
            .requests
            .iter_mut()
            .filter(|r| matches!(r.state, RequestState::NotSerialized))
        {
            if let Some(msg_id) = self.mtp.push(&mut self.write_buffer, &request.body) {
                let req_id = u32::from_le_bytes(request.body[..4].try_into().unwrap());
                debug!(
                    "serialized request {:x} ({}) with {:?}",
                    req_id,
                    tl::name_for_id(req_id),
                    msg_id
                );
                // Only NotSerialized requests may become Serialized, or
                // re-sends would duplicate and flood the transport.
                request.state = RequestState::Serialized(MsgIdPair::new(msg_id));
            } else {
                break;
            }
        }

        if let Some(container_msg_id) = self.mtp.finalize(&mut self.write_buffer) {
            for request in self.requests.iter_mut() {
                if let RequestState::Serialized(ref mut pair) = request.state {
                    pair.container_msg_id = container_msg_id;
                }
            }
            self.transport.pack(&mut self.write_buffer);
        }
    }

    /// Handle `n` freshly-read bytes sitting in the read buffer.
    fn on_net_read(&mut self, n: usize) -> Result<Vec<UpdatesLike>, ReadError> {
        if n == 0 {
            return Err(ReadError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "read 0 bytes",
            )));
        }

        self.read_tail += n;
        trace!("read {n} bytes from the network");

        let mut updates = Vec::new();
        let mut next_offset = 0;
        while next_offset != self.read_tail {
            match self
                .transport
                .unpack(&mut self.read_buffer[next_offset..self.read_tail])
            {
                Ok(offset) => {
                    let results = self
                        .mtp
                        .deserialize(&self.read_buffer[next_offset..][offset.data_start..offset.data_end])?;
                    self.process_mtp_results(results, &mut updates);
                    next_offset += offset.next_offset;
                }
                Err(transport::Error::MissingBytes) => break,
                Err(err) => return Err(err.into()),
            }
        }

        self.read_buffer.copy_within(next_offset..self.read_tail, 0);
        self.read_tail -= next_offset;

        Ok(updates)
    }

    /// Handle `n` bytes having been written out.
    fn on_net_write(&mut self, n: usize) {
        self.write_head += n;
        trace!(
            "written {} bytes to the network ({}/{})",
            n,
            self.write_head,
            self.write_buffer.len()
        );
        assert!(self.write_head <= self.write_buffer.len());
        if self.write_head != self.write_buffer.len() {
            return;
        }

        self.write_buffer.clear();
        self.write_head = 0;
        for request in self.requests.iter_mut() {
            if let RequestState::Serialized(pair) = &request.state {
                trace!("sent request with {pair:?}");
                request.state = RequestState::Sent(pair.clone());
            }
        }
    }

    /// Enqueue a fresh keepalive ping.
    fn on_ping_timeout(&mut self) {
        let ping_id = generate_random_id();
        debug!("enqueueing keepalive ping {ping_id}");
        let (tx, _rx) = oneshot::channel();
        self.enqueue_body(
            tl::functions::PingDelayDisconnect {
                ping_id,
                disconnect_delay: NO_PING_DISCONNECT,
            }
            .to_bytes(),
            tx,
        );
        self.next_ping = Instant::now() + PING_DELAY;
    }

    /// Re-establish the connection per the policy. On success, requests
    /// without a terminal answer are queued to be sent again with fresh
    /// identifiers (their delivery state is unknown, but re-executing a
    /// request twice is preferable to silently losing it).
    async fn try_reconnect(&mut self) -> Result<(), ()> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.reconnection_policy.should_retry(attempts) {
                ControlFlow::Continue(delay) => sleep(delay).await,
                ControlFlow::Break(()) => {
                    if attempts > 1 {
                        error!("giving up reconnecting after {attempts} attempts");
                    }
                    return Err(());
                }
            }

            info!("reconnecting, attempt {attempts}");
            match NetStream::connect(&self.addr).await {
                Ok(stream) => {
                    self.stream = stream;
                    self.transport.reset();
                    self.mtp.reset();
                    self.read_tail = 0;
                    self.write_buffer.clear();
                    self.write_head = 0;
                    self.next_ping = Instant::now() + PING_DELAY;
                    for request in self.requests.iter_mut() {
                        request.state = RequestState::NotSerialized;
                    }
                    info!("reconnected; {} request(s) queued again", self.requests.len());
                    return Ok(());
                }
                Err(err) => {
                    warn!("reconnect attempt {attempts} failed: {err}");
                }
            }
        }
    }

    fn fail_all_requests(&mut self, error: &ReadError) {
        warn!(
            "marking all {} request(s) as failed: {}",
            self.requests.len(),
            error
        );
        self.requests.drain(..).for_each(|request| {
            let _ = request
                .result
                .send(Err(InvocationError::from(error.clone())));
        });
    }

    fn process_mtp_results(&mut self, results: Vec<Incoming>, updates: &mut Vec<UpdatesLike>) {
        for result in results {
            match result {
                Incoming::RpcResult { msg_id, body } => self.process_result(msg_id, body),
                Incoming::RpcError { msg_id, error } => self.process_error(msg_id, error),
                Incoming::BadMessage(bad_msg) => self.process_bad_message(bad_msg),
                Incoming::OwnUpdate { update, .. } => self.process_update(updates, update),
                Incoming::Update(update) => self.process_update(updates, update),
                // Updates may have been lost when the server started the
                // new session; have the upper layer fetch the difference.
                Incoming::NewSession => updates.push(UpdatesLike::Reconnection),
                Incoming::Failure { msg_id, error } => self.process_failure(msg_id, error),
            }
        }
    }

    fn process_update(&mut self, updates: &mut Vec<UpdatesLike>, update: Vec<u8>) {
        match tl::enums::Updates::from_bytes(&update) {
            Ok(u) => updates.push(UpdatesLike::Updates(u)),
            Err(e) => warn!("server sent updates that failed to be deserialized: {e}"),
        }
    }

    fn process_result(&mut self, msg_id: MsgId, body: Vec<u8>) {
        if let Some(request) = self.pop_request(msg_id) {
            let res_id = u32::from_le_bytes(body[..4].try_into().unwrap_or_default());
            debug!(
                "got result {:x} ({}) for request {:?}",
                res_id,
                tl::name_for_id(res_id),
                msg_id
            );
            if request.result.send(Ok(body)).is_err() {
                debug!("discarding response for cancelled request {msg_id:?}");
            }
        } else {
            info!("got rpc result {msg_id:?} but no such request is saved");
        }
    }

    fn process_error(&mut self, msg_id: MsgId, error: tl::types::RpcError) {
        if let Some(request) = self.pop_request(msg_id) {
            debug!("got rpc error {error:?} for request {msg_id:?}");
            let req_id = u32::from_le_bytes(request.body[..4].try_into().unwrap());
            let _ = request.result.send(Err(InvocationError::Rpc(
                RpcError::from(error).with_caused_by(req_id),
            )));
        } else {
            info!("got rpc error {error:?} but no such request is saved");
        }
    }

    fn process_bad_message(&mut self, bad_msg: BadMessage) {
        for i in (0..self.requests.len()).rev() {
            match &self.requests[i].state {
                RequestState::Serialized(pair)
                    if pair.msg_id == bad_msg.msg_id
                        || pair.container_msg_id == bad_msg.msg_id =>
                {
                    panic!(
                        "bad msg for unsent request {:?}: {}",
                        bad_msg.msg_id,
                        bad_msg.description()
                    );
                }
                RequestState::Sent(pair)
                    if pair.msg_id == bad_msg.msg_id
                        || pair.container_msg_id == bad_msg.msg_id =>
                {
                    if bad_msg.retryable() {
                        // The protocol state was already fixed up (salt or
                        // time offset); sending again is all that's left.
                        info!(
                            "{}; re-sending request {:?}",
                            bad_msg.description(),
                            pair.msg_id
                        );
                        self.requests[i].state = RequestState::NotSerialized;
                    } else {
                        if bad_msg.fatal() {
                            error!(
                                "{}; cannot retry request {:?}",
                                bad_msg.description(),
                                pair.msg_id
                            );
                        } else {
                            warn!(
                                "{}; cannot retry request {:?}",
                                bad_msg.description(),
                                pair.msg_id
                            );
                        }
                        let request = self.requests.swap_remove(i);
                        let _ = request.result.send(Err(InvocationError::Dropped));
                    }
                }
                _ => {}
            }
        }
    }

    fn process_failure(&mut self, msg_id: MsgId, error: mtp::DeserializeError) {
        if let Some(request) = self.pop_request(msg_id) {
            debug!("got deserialization failure {error:?} for {msg_id:?}");
            let _ = request.result.send(Err(InvocationError::from(error)));
        } else {
            info!("got deserialization failure {error:?} but no such request is saved");
        }
    }

    fn pop_request(&mut self, msg_id: MsgId) -> Option<Request> {
        for i in 0..self.requests.len() {
            match &self.requests[i].state {
                RequestState::Serialized(pair) if pair.msg_id == msg_id => {
                    panic!("got response {msg_id:?} for unsent request {pair:?}");
                }
                RequestState::Sent(pair) if pair.msg_id == msg_id => {
                    return Some(self.requests.swap_remove(i));
                }
                _ => {}
            }
        }
        None
    }
}

impl<T: Transport> Sender<T, mtp::Encrypted> {
    /// The authorization key in use, for persisting.
    pub fn auth_key(&self) -> [u8; 256] {
        self.mtp.auth_key()
    }
}

/// How many times the authorization key generation is restarted from the
/// beginning before giving up, when an integrity check fails or the server
/// asks for a retry.
const AUTH_KEY_GEN_ATTEMPTS: usize = 5;

/// Connect to the address and generate a brand new authorization key over
/// the plain protocol before switching to the encrypted one.
pub async fn connect<T: Transport>(
    transport: T,
    addr: ServerAddr,
) -> Result<Sender<T, mtp::Encrypted>, InvocationError> {
    let sender = Sender::connect(transport, mtp::Plain::new(), addr).await?;
    generate_auth_key(sender).await
}

/// Run the authorization-key handshake over a plain sender, and return an
/// encrypted sender reusing the same connection and buffers.
///
/// Failed integrity checks and `dh_gen_retry` restart the whole exchange
/// (with fresh randomness) a bounded number of times; `dh_gen_fail` and
/// network errors do not.
pub async fn generate_auth_key<T: Transport>(
    mut sender: Sender<T, mtp::Plain>,
) -> Result<Sender<T, mtp::Encrypted>, InvocationError> {
    let mut finished = None;
    let mut last_error = None;
    for attempt in 1..=AUTH_KEY_GEN_ATTEMPTS {
        info!("generating new authorization key, attempt {attempt}...");
        match try_generate_auth_key(&mut sender).await {
            Ok(done) => {
                finished = Some(done);
                break;
            }
            Err(InvocationError::Authentication(handshake::Error::DhGenFail)) => {
                return Err(handshake::Error::DhGenFail.into());
            }
            Err(InvocationError::Authentication(err)) => {
                warn!("authorization key generation failed: {err}");
                last_error = Some(err.into());
            }
            Err(err) => return Err(err),
        }
    }

    let handshake::Finished {
        auth_key,
        time_offset,
        first_salt,
    } = match finished {
        Some(finished) => finished,
        None => return Err(last_error.expect("failed attempts always record an error")),
    };
    info!("authorization key generated successfully");

    Ok(Sender {
        stream: sender.stream,
        transport: sender.transport,
        mtp: mtp::Encrypted::build()
            .time_offset(time_offset)
            .first_salt(first_salt)
            .finish(auth_key),
        addr: sender.addr,
        requests: sender.requests,
        next_ping: Instant::now() + PING_DELAY,
        reconnection_policy: sender.reconnection_policy,
        read_buffer: sender.read_buffer,
        read_tail: sender.read_tail,
        write_buffer: sender.write_buffer,
        write_head: sender.write_head,
    })
}

async fn try_generate_auth_key<T: Transport>(
    sender: &mut Sender<T, mtp::Plain>,
) -> Result<handshake::Finished, InvocationError> {
    let (request, data) = handshake::step1()?;
    let response = sender.invoke(&tl::functions::Raw { body: request }).await?;
    let (request, data) = handshake::step2(data, &response.0)?;
    let response = sender.invoke(&tl::functions::Raw { body: request }).await?;
    let (request, data) = handshake::step3(data, &response.0)?;
    let response = sender.invoke(&tl::functions::Raw { body: request }).await?;
    Ok(handshake::create_key(data, &response.0)?)
}

/// Connect to the address reusing a previously-generated authorization key.
pub async fn connect_with_auth<T: Transport>(
    transport: T,
    addr: ServerAddr,
    auth_key: [u8; 256],
) -> Result<Sender<T, mtp::Encrypted>, io::Error> {
    Sender::connect(transport, mtp::Encrypted::build().finish(auth_key), addr).await
}
