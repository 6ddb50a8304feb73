// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::net::IpAddr;
use std::ops::ControlFlow;
use std::panic;
use std::sync::Arc;

use ferrogram_mtproto::{mtp, transport};
use ferrogram_session::{Datacenter, Storage, UpdatesLike};
use ferrogram_tl as tl;
use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::{AbortHandle, JoinSet};

use crate::errors::{InvocationError, ReadError};
use crate::net::ServerAddr;
use crate::params::ConnectionParams;
use crate::sender::{connect, connect_with_auth, Sender};

pub(crate) type PoolTransport = transport::Full;

type InvokeResponse = Vec<u8>;

enum Request {
    Invoke {
        dc_id: i32,
        body: Vec<u8>,
        tx: oneshot::Sender<Result<InvokeResponse, InvocationError>>,
    },
    Disconnect {
        dc_id: i32,
    },
    Quit,
}

struct Rpc {
    body: Vec<u8>,
    tx: oneshot::Sender<Result<InvokeResponse, InvocationError>>,
}

struct ConnectionInfo {
    dc_id: i32,
    rpc_tx: mpsc::UnboundedSender<Rpc>,
    abort_handle: AbortHandle,
}

/// Cheaply cloneable handle to interact with its [`SenderPoolRunner`].
#[derive(Clone)]
pub struct SenderPoolHandle(mpsc::UnboundedSender<Request>);

/// The entry point to this crate: a runner owning every connection, the
/// handle to talk to it, and the stream of updates it produces.
pub struct SenderPool {
    /// The single mutable instance responsible for driving I/O.
    ///
    /// Connections are created on demand, so errors while the pool runs
    /// can only be observed through [`SenderPool::handle`] invocations.
    pub runner: SenderPoolRunner,
    /// Starting handle attached to the runner.
    pub handle: SenderPoolHandle,
    /// Updates received from the home datacenter. Update handling is
    /// sequential by nature, so this receiver cannot be cloned.
    pub updates: mpsc::UnboundedReceiver<UpdatesLike>,
}

/// Manages and runs a pool of zero or more [`Sender`]s, one per
/// datacenter, spawned the first time a request is routed to each.
pub struct SenderPoolRunner {
    storage: Arc<dyn Storage>,
    api_id: i32,
    params: ConnectionParams,
    request_rx: mpsc::UnboundedReceiver<Request>,
    updates_tx: mpsc::UnboundedSender<UpdatesLike>,
    connections: Vec<ConnectionInfo>,
    connection_tasks: JoinSet<Result<(), ReadError>>,
}

impl SenderPoolHandle {
    /// Invoke the serialized request body in the given datacenter,
    /// connecting to it first if needed.
    pub async fn invoke_in_dc(
        &self,
        dc_id: i32,
        body: Vec<u8>,
    ) -> Result<InvokeResponse, InvocationError> {
        let (tx, rx) = oneshot::channel();
        self.0
            .send(Request::Invoke { dc_id, body, tx })
            .map_err(|_| InvocationError::Dropped)?;
        rx.await.map_err(|_| InvocationError::Dropped)?
    }

    /// Drop any active connection to the given datacenter. Useful after
    /// migrations, when the old connection is known to be useless.
    pub fn disconnect_from_dc(&self, dc_id: i32) -> bool {
        self.0.send(Request::Disconnect { dc_id }).is_ok()
    }

    /// Drop all connections and have the runner return.
    pub fn quit(&self) -> bool {
        self.0.send(Request::Quit).is_ok()
    }
}

impl SenderPool {
    /// Create a new pool over the given session storage, using the
    /// developer's [api identifier](https://core.telegram.org/myapp).
    ///
    /// The storage must not be shared with another running pool.
    pub fn new(storage: Arc<dyn Storage>, api_id: i32) -> Self {
        Self::with_params(storage, api_id, Default::default())
    }

    /// Like [`SenderPool::new`] with explicit connection parameters.
    pub fn with_params(storage: Arc<dyn Storage>, api_id: i32, params: ConnectionParams) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();

        Self {
            runner: SenderPoolRunner {
                storage,
                api_id,
                params,
                request_rx,
                updates_tx,
                connections: Vec::new(),
                connection_tasks: JoinSet::new(),
            },
            handle: SenderPoolHandle(request_tx),
            updates: updates_rx,
        }
    }
}

impl SenderPoolRunner {
    /// Run the pool until [`SenderPoolHandle::quit`] is called, every
    /// handle is dropped, or the returned future is dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                completion = self.connection_tasks.join_next(), if !self.connection_tasks.is_empty() => {
                    if let Some(Err(err)) = completion {
                        if let Ok(reason) = err.try_into_panic() {
                            panic::resume_unwind(reason);
                        }
                    }
                    self.connections
                        .retain(|connection| !connection.abort_handle.is_finished());
                }
                request = self.request_rx.recv() => {
                    let flow = match request {
                        Some(request) => self.process_request(request).await,
                        None => ControlFlow::Break(()),
                    };
                    if flow.is_break() {
                        break;
                    }
                }
            }
        }

        // Dropping the channels makes every `run_sender` loop return.
        self.connections.clear();
        while self.connection_tasks.join_next().await.is_some() {}
    }

    async fn process_request(&mut self, request: Request) -> ControlFlow<()> {
        match request {
            Request::Invoke { dc_id, body, tx } => {
                let Some(dc) = self.storage.load_datacenter(dc_id) else {
                    let _ = tx.send(Err(InvocationError::InvalidDc));
                    return ControlFlow::Continue(());
                };

                let connection = match self
                    .connections
                    .iter()
                    .position(|connection| connection.dc_id == dc_id)
                {
                    Some(i) => &self.connections[i],
                    None => {
                        let sender = match self.connect_sender(&dc).await {
                            Ok(sender) => sender,
                            Err(err) => {
                                let _ = tx.send(Err(err));
                                return ControlFlow::Continue(());
                            }
                        };

                        self.storage.save_auth_key(dc.id, &sender.auth_key());

                        let home = self.storage.home_datacenter().map(|id| id == dc.id).unwrap_or(false);
                        let (rpc_tx, rpc_rx) = mpsc::unbounded_channel();
                        let abort_handle = self.connection_tasks.spawn(run_sender(
                            sender,
                            rpc_rx,
                            self.updates_tx.clone(),
                            home,
                        ));
                        self.connections.push(ConnectionInfo {
                            dc_id,
                            rpc_tx,
                            abort_handle,
                        });
                        self.connections.last().unwrap()
                    }
                };

                let _ = connection.rpc_tx.send(Rpc { body, tx });
                ControlFlow::Continue(())
            }
            Request::Disconnect { dc_id } => {
                self.connections.retain(|connection| {
                    if connection.dc_id == dc_id {
                        debug!("dropping connection to dc {dc_id}");
                        connection.abort_handle.abort();
                        false
                    } else {
                        true
                    }
                });
                ControlFlow::Continue(())
            }
            Request::Quit => ControlFlow::Break(()),
        }
    }

    fn server_addr(&self, dc: &Datacenter) -> Result<ServerAddr, InvocationError> {
        let address = dc.socket_addr().ok_or(InvocationError::InvalidDc)?;

        if let Some(connector) = self.params.connector.clone() {
            return Ok(ServerAddr::Custom { address, connector });
        }
        #[cfg(feature = "proxy")]
        if let Some(proxy) = self.params.proxy_url.clone() {
            return Ok(ServerAddr::Proxied { address, proxy });
        }
        Ok(ServerAddr::Tcp { address })
    }

    /// Open a connection to a datacenter, generating an authorization key
    /// on the spot when the session has none, and initialize it.
    async fn connect_sender(
        &mut self,
        dc: &Datacenter,
    ) -> Result<Sender<PoolTransport, mtp::Encrypted>, InvocationError> {
        let addr = self.server_addr(dc)?;

        let init_connection = tl::functions::InvokeWithLayer {
            layer: tl::LAYER,
            query: tl::functions::InitConnection {
                api_id: self.api_id,
                device_model: self.params.device_model.clone(),
                system_version: self.params.system_version.clone(),
                app_version: self.params.app_version.clone(),
                system_lang_code: self.params.system_lang_code.clone(),
                lang_pack: "".into(),
                lang_code: self.params.lang_code.clone(),
                query: tl::functions::help::GetConfig,
            },
        };

        let mut sender = if let Some(auth_key) = self.storage.load_auth_key(dc.id) {
            info!("connecting to dc {} with existing authorization key", dc.id);
            connect_with_auth(PoolTransport::new(), addr.clone(), auth_key).await?
        } else {
            info!("connecting to dc {} and generating a new key", dc.id);
            connect(PoolTransport::new(), addr.clone()).await?
        };
        sender.set_reconnection_policy(self.params.reconnection_policy.clone());

        let config = match sender.invoke(&init_connection).await {
            Ok(config) => config,
            Err(InvocationError::Transport(transport::Error::BadStatus { status: 404 })) => {
                // The server no longer recognizes the stored key; generate
                // a fresh one and try once more.
                warn!("server no longer knows our key for dc {}; regenerating", dc.id);
                self.storage.clear_auth_key(dc.id);
                sender = connect(PoolTransport::new(), addr).await?;
                sender.invoke(&init_connection).await?
            }
            Err(err) => return Err(err),
        };

        let tl::enums::Config::Config(config) = config;
        self.apply_remote_config(config);

        Ok(sender)
    }

    /// Refresh the stored datacenter addresses from the server-provided
    /// configuration.
    fn apply_remote_config(&mut self, config: tl::types::Config) {
        for tl::enums::DcOption::Option(option) in config.dc_options {
            if option.cdn || option.tcpo_only {
                continue;
            }

            let mut dc = self
                .storage
                .load_datacenter(option.id)
                .unwrap_or(Datacenter {
                    id: option.id,
                    ipv4: None,
                    ipv6: None,
                    port: option.port as u16,
                    is_media: option.media_only,
                    is_home: false,
                });

            match option.ip_address.parse::<IpAddr>() {
                Ok(IpAddr::V4(addr)) if !option.ipv6 => {
                    dc.ipv4 = Some(addr);
                    dc.port = option.port as u16;
                }
                Ok(IpAddr::V6(addr)) if option.ipv6 => {
                    dc.ipv6 = Some(addr);
                }
                _ => {
                    warn!("server sent a malformed address for dc {}", option.id);
                    continue;
                }
            }
            dc.is_media = option.media_only;

            self.storage.save_datacenter(&dc);
        }
    }
}

async fn run_sender(
    mut sender: Sender<PoolTransport, mtp::Encrypted>,
    mut rpc_rx: mpsc::UnboundedReceiver<Rpc>,
    updates: mpsc::UnboundedSender<UpdatesLike>,
    home_sender: bool,
) -> Result<(), ReadError> {
    loop {
        tokio::select! {
            step = sender.step() => match step {
                Ok(new_updates) => new_updates.into_iter().for_each(|update| {
                    let _ = updates.send(update);
                }),
                Err(err) => {
                    // Updates flow through the home connection; when that
                    // one dies, whatever was in flight must be re-fetched.
                    if home_sender {
                        let _ = updates.send(UpdatesLike::Reconnection);
                    }
                    break Err(err);
                }
            },
            rpc = rpc_rx.recv() => match rpc {
                Some(rpc) => sender.enqueue_body(rpc.body, rpc.tx),
                None => break Ok(()),
            },
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke { dc_id, body, .. } => f
                .debug_struct("Invoke")
                .field("dc_id", dc_id)
                .field(
                    "request",
                    &body[..4]
                        .try_into()
                        .map(|id| tl::name_for_id(u32::from_le_bytes(id)))
                        .unwrap_or("?"),
                )
                .finish(),
            Self::Disconnect { dc_id } => {
                f.debug_struct("Disconnect").field("dc_id", dc_id).finish()
            }
            Self::Quit => write!(f, "Quit"),
        }
    }
}
