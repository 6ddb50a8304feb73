// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tests driving a [`Sender`] against an in-memory server through the
//! user-supplied connector hook.
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use ferrogram_mtproto::mtp::Plain;
use ferrogram_mtproto::transport::Abridged;
use ferrogram_mtsender::{Connection, Connector, Sender, ServerAddr};
use ferrogram_tl::{functions, Serializable};
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::sync::oneshot;

/// Hands out a pre-established in-memory stream instead of dialing TCP.
struct DuplexConnector(Mutex<Option<DuplexStream>>);

impl Connector for DuplexConnector {
    fn connect<'a>(
        &'a self,
        _addr: SocketAddr,
    ) -> Pin<Box<dyn Future<Output = io::Result<Box<dyn Connection>>> + Send + 'a>> {
        let stream = self
            .0
            .lock()
            .unwrap()
            .take()
            .expect("connector used more than once");
        Box::pin(async move { Ok(Box::new(stream) as Box<dyn Connection>) })
    }
}

fn server_addr(stream: DuplexStream) -> ServerAddr {
    ServerAddr::Custom {
        address: "127.0.0.1:443".parse().unwrap(),
        connector: Arc::new(DuplexConnector(Mutex::new(Some(stream)))),
    }
}

/// Reads one abridged-framed plain message from the stream, skipping the
/// one-time `0xef` marker.
async fn read_plain_request(stream: &mut DuplexStream, first: bool) -> Vec<u8> {
    if first {
        let mut marker = [0u8; 1];
        stream.read_exact(&mut marker).await.unwrap();
        assert_eq!(marker[0], 0xef);
    }

    let mut len = [0u8; 1];
    stream.read_exact(&mut len).await.unwrap();
    assert!(len[0] < 127, "tests only use small messages");

    let mut frame = vec![0u8; len[0] as usize * 4];
    stream.read_exact(&mut frame).await.unwrap();

    // auth_key_id = 0 and msg_id = 0 for plain client messages.
    assert_eq!(&frame[..16], &[0u8; 16]);
    let body_len = i32::from_le_bytes(frame[16..20].try_into().unwrap()) as usize;
    frame[20..20 + body_len].to_vec()
}

/// Writes a plain message body back, abridged-framed.
async fn write_plain_response(stream: &mut DuplexStream, body: &[u8]) {
    let mut payload = Vec::new();
    0i64.serialize(&mut payload); // auth_key_id
    5i64.serialize(&mut payload); // msg_id; responses are 1 (mod 4)
    (body.len() as i32).serialize(&mut payload);
    payload.extend(body);

    let mut framed = vec![(payload.len() / 4) as u8];
    framed.extend(&payload);
    stream.write_all(&framed).await.unwrap();
}

#[tokio::test]
async fn invoke_roundtrip_over_custom_connector() {
    let _ = simple_logger::SimpleLogger::new().init();
    let (client_end, mut server_end) = duplex(4096);

    let server = tokio::spawn(async move {
        let request = read_plain_request(&mut server_end, true).await;
        assert_eq!(request, b"ping");
        write_plain_response(&mut server_end, b"pong").await;
        server_end
    });

    let mut sender = Sender::connect(Abridged::new(), Plain::new(), server_addr(client_end))
        .await
        .unwrap();

    let response = sender
        .invoke(&functions::Raw {
            body: b"ping".to_vec(),
        })
        .await
        .unwrap();
    assert_eq!(response.0, b"pong");

    server.await.unwrap();
}

#[tokio::test]
async fn cancelled_request_never_resolves() {
    let (client_end, mut server_end) = duplex(4096);

    let server = tokio::spawn(async move {
        let _request = read_plain_request(&mut server_end, true).await;
        write_plain_response(&mut server_end, b"late").await;
        server_end
    });

    let mut sender = Sender::connect(Abridged::new(), Plain::new(), server_addr(client_end))
        .await
        .unwrap();

    let (tx, rx) = oneshot::channel();
    sender.enqueue_body(b"ping".to_vec(), tx);
    // The caller goes away before the response arrives.
    drop(rx);

    // The first step flushes the request out, the second processes the
    // response; the response for the cancelled request is discarded
    // without incident.
    sender.step().await.unwrap();
    sender.step().await.unwrap();

    server.await.unwrap();
}
