// Copyright 2024 - developers of the `ferrogram` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::mem;
use std::time::{SystemTime, UNIX_EPOCH};

use ferrogram_crypto::{decrypt_envelope, encrypt_envelope, AuthKey, HeadroomBuffer};
use ferrogram_tl::{enums, types, Cursor, Deserializable, Identifiable, Serializable};
use getrandom::getrandom;
use log::{debug, info, trace, warn};

use super::{
    BadMessage, DeserializeError, Incoming, Mtp, MESSAGE_CONTAINER_HEADER_LEN,
    SALT_SESSION_HEADER_LEN,
};
use crate::message::{GzipPacked, Message, MessageContainer, RpcResult, MSG_COPY_CONSTRUCTOR_ID};
use crate::MsgId;

/// Outgoing messages larger than this many bytes are attempted to be
/// compressed by default.
const DEFAULT_COMPRESSION_THRESHOLD: Option<usize> = Some(512);

/// Constructor identifiers whose payload is an `Updates`-like body, used
/// to detect updates inside the results to our own requests.
static UPDATE_IDS: [u32; 6] = [
    types::UpdateShortMessage::CONSTRUCTOR_ID,
    types::UpdateShortChatMessage::CONSTRUCTOR_ID,
    types::UpdateShort::CONSTRUCTOR_ID,
    types::UpdatesCombined::CONSTRUCTOR_ID,
    types::Updates::CONSTRUCTOR_ID,
    types::UpdateShortSentMessage::CONSTRUCTOR_ID,
];

/// A builder to configure [`Encrypted`] instances.
pub struct Builder {
    time_offset: i32,
    first_salt: i64,
    compression_threshold: Option<usize>,
}

impl Builder {
    /// Configures the time offset to the server's clock, in seconds.
    pub fn time_offset(mut self, offset: i32) -> Self {
        self.time_offset = offset;
        self
    }

    /// Configures the first server salt to use.
    pub fn first_salt(mut self, salt: i64) -> Self {
        self.first_salt = salt;
        self
    }

    /// Configures the compression threshold for outgoing messages, or
    /// disables compression entirely with `None`.
    pub fn compression_threshold(mut self, threshold: Option<usize>) -> Self {
        self.compression_threshold = threshold;
        self
    }

    /// Finishes the builder into an [`Encrypted`] instance using the given
    /// authorization key.
    pub fn finish(self, auth_key: [u8; 256]) -> Encrypted {
        Encrypted {
            auth_key: AuthKey::from_bytes(auth_key),
            time_offset: self.time_offset,
            salt: self.first_salt,
            session_id: generate_session_id(),
            sequence: 0,
            last_msg_id: 0,
            pending_ack: vec![],
            compression_threshold: self.compression_threshold,
            results: Vec::new(),
            msg_count: 0,
        }
    }
}

fn generate_session_id() -> i64 {
    let mut buffer = [0u8; 8];
    getrandom(&mut buffer).expect("failed to generate a secure session id");
    i64::from_le_bytes(buffer)
}

/// The encrypted message layer. Owns the authorization key and the session
/// state: identifier, server salt, sequence number and pending
/// acknowledgements.
pub struct Encrypted {
    auth_key: AuthKey,

    /// Signed difference between the server's clock and ours, mixed into
    /// every generated message identifier.
    time_offset: i32,

    /// Salt the server currently expects inside the encrypted envelope.
    salt: i64,

    /// Random identifier for this session; a fresh one is drawn whenever a
    /// new transport is bound to the same key.
    session_id: i64,

    /// Twice the number of content-related messages sent so far.
    sequence: i32,

    /// Last generated message identifier; the next must always be higher.
    last_msg_id: i64,

    /// Identifiers of content-related messages received from the server
    /// which have not been acknowledged yet. They all go out in a single
    /// `msgs_ack` along with the next payload.
    pending_ack: Vec<i64>,

    compression_threshold: Option<usize>,

    /// Consequences accumulated while processing one incoming payload.
    results: Vec<Incoming>,

    /// How many messages the current outgoing buffer holds.
    msg_count: usize,
}

impl Encrypted {
    /// Start building a new encrypted message layer.
    pub fn build() -> Builder {
        Builder {
            time_offset: 0,
            first_salt: 0,
            compression_threshold: DEFAULT_COMPRESSION_THRESHOLD,
        }
    }

    /// The authorization key in use, for persisting.
    pub fn auth_key(&self) -> [u8; 256] {
        self.auth_key.to_bytes()
    }

    /// The current time offset to the server's clock, in seconds.
    pub fn time_offset(&self) -> i32 {
        self.time_offset
    }

    /// Correct the time offset from a known-valid server message id.
    fn correct_time_offset(&mut self, msg_id: i64) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time is before epoch")
            .as_secs() as i32;

        self.time_offset = ((msg_id >> 32) as i32).wrapping_sub(now);
        debug!("corrected time offset to {}s", self.time_offset);
    }

    /// Generate a new message identifier: current time in the upper half,
    /// sub-second precision below, low two bits clear, strictly above any
    /// previously generated one.
    fn next_msg_id(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time is before epoch");

        let seconds = (now.as_secs() as i64 + self.time_offset as i64) as u64;
        let nanoseconds = now.subsec_nanos() as u64;
        let mut msg_id = ((seconds << 32) | (nanoseconds << 2)) as i64;

        if self.last_msg_id >= msg_id {
            msg_id = self.last_msg_id + 4;
        }

        self.last_msg_id = msg_id;
        msg_id
    }

    /// Next sequence number; odd and increasing for content-related
    /// messages, the current even value otherwise.
    fn next_seq_no(&mut self, content_related: bool) -> i32 {
        if content_related {
            self.sequence += 2;
            self.sequence - 1
        } else {
            self.sequence
        }
    }

    fn serialize_msg(
        &mut self,
        buffer: &mut HeadroomBuffer<u8>,
        body: &[u8],
        content_related: bool,
    ) -> MsgId {
        let msg_id = self.next_msg_id();

        msg_id.serialize(buffer);
        self.next_seq_no(content_related).serialize(buffer);
        (body.len() as i32).serialize(buffer);
        buffer.extend(body);

        self.msg_count += 1;
        MsgId(msg_id)
    }

    /// [`Mtp::finalize`], but without the encryption step.
    fn finalize_plain(&mut self, buffer: &mut HeadroomBuffer<u8>) -> Option<MsgId> {
        if !self.pending_ack.is_empty() {
            let ack = enums::MsgsAck::Ack(types::MsgsAck {
                msg_ids: mem::take(&mut self.pending_ack),
            })
            .to_bytes();
            self.serialize_msg(buffer, &ack, false);
        }

        if self.msg_count == 0 {
            return None;
        }

        let msg_id = if self.msg_count == 1 {
            MsgId(self.last_msg_id)
        } else {
            // All inner identifiers were generated before the container's,
            // as the protocol requires.
            let mut header = Vec::with_capacity(MESSAGE_CONTAINER_HEADER_LEN);
            let container_msg_id = self.next_msg_id();
            container_msg_id.serialize(&mut header);
            self.next_seq_no(false).serialize(&mut header);
            ((buffer.len() + MessageContainer::SIZE_OVERHEAD) as i32).serialize(&mut header);
            MessageContainer::CONSTRUCTOR_ID.serialize(&mut header);
            (self.msg_count as i32).serialize(&mut header);
            buffer.extend_front(&header);
            MsgId(container_msg_id)
        };

        let mut head = Vec::with_capacity(SALT_SESSION_HEADER_LEN);
        self.salt.serialize(&mut head);
        self.session_id.serialize(&mut head);
        buffer.extend_front(&head);

        self.msg_count = 0;
        Some(msg_id)
    }

    fn process_message(&mut self, message: Message) -> Result<(), DeserializeError> {
        if message.requires_ack() {
            self.pending_ack.push(message.msg_id);
        }

        // Every service message the server can send is recognized here;
        // anything else must be an `Updates` body.
        match message.constructor_id()? {
            RpcResult::CONSTRUCTOR_ID => self.handle_rpc_result(message),
            types::MsgsAck::CONSTRUCTOR_ID => self.handle_ack(message),
            types::BadMsgNotification::CONSTRUCTOR_ID
            | types::BadServerSalt::CONSTRUCTOR_ID => self.handle_bad_notification(message),
            types::MsgsStateReq::CONSTRUCTOR_ID
            | types::MsgsStateInfo::CONSTRUCTOR_ID
            | types::MsgsAllInfo::CONSTRUCTOR_ID
            | types::MsgResendReq::CONSTRUCTOR_ID => self.handle_state_messages(message),
            types::MsgDetailedInfo::CONSTRUCTOR_ID
            | types::MsgNewDetailedInfo::CONSTRUCTOR_ID => self.handle_detailed_info(message),
            types::FutureSalts::CONSTRUCTOR_ID => self.handle_future_salts(message),
            types::Pong::CONSTRUCTOR_ID => self.handle_pong(message),
            types::DestroySessionOk::CONSTRUCTOR_ID
            | types::DestroySessionNone::CONSTRUCTOR_ID => Ok(()),
            types::NewSessionCreated::CONSTRUCTOR_ID => self.handle_new_session_created(message),
            MessageContainer::CONSTRUCTOR_ID => self.handle_container(message),
            MSG_COPY_CONSTRUCTOR_ID => {
                warn!("received a msg_copy, which the server should never send");
                Ok(())
            }
            GzipPacked::CONSTRUCTOR_ID => self.handle_gzip_packed(message),
            types::HttpWait::CONSTRUCTOR_ID => Ok(()),
            _ => self.handle_update(message),
        }
    }

    /// `rpc_result#f35c6d01 req_msg_id:long result:Object = RpcResult;`
    fn handle_rpc_result(&mut self, message: Message) -> Result<(), DeserializeError> {
        let rpc_result = RpcResult::from_bytes(&message.body)?;
        let msg_id = MsgId(rpc_result.req_msg_id);

        // Failures from here on belong to the request that triggered them,
        // not to the connection.
        let inner_constructor = match rpc_result.inner_constructor() {
            Ok(id) => id,
            Err(error) => {
                self.results.push(Incoming::Failure {
                    msg_id,
                    error: error.into(),
                });
                return Ok(());
            }
        };
        let result = rpc_result.result;

        match inner_constructor {
            types::RpcError::CONSTRUCTOR_ID => match enums::RpcError::from_bytes(&result) {
                Ok(enums::RpcError::Error(error)) => {
                    self.results.push(Incoming::RpcError { msg_id, error })
                }
                Err(error) => self.results.push(Incoming::Failure {
                    msg_id,
                    error: error.into(),
                }),
            },
            // Answers to `rpc_drop_answer`; the dropped request's own entry
            // was already settled by whoever dropped it.
            types::RpcAnswerUnknown::CONSTRUCTOR_ID
            | types::RpcAnswerDroppedRunning::CONSTRUCTOR_ID
            | types::RpcAnswerDropped::CONSTRUCTOR_ID => {
                debug!("dropped-answer confirmation for {msg_id:?}")
            }
            GzipPacked::CONSTRUCTOR_ID => match GzipPacked::from_bytes(&result) {
                Ok(gzip) => match gzip.decompress() {
                    Ok(body) => {
                        self.note_own_update(msg_id, &body);
                        self.results.push(Incoming::RpcResult { msg_id, body });
                    }
                    Err(error) => self.results.push(Incoming::Failure { msg_id, error }),
                },
                Err(error) => self.results.push(Incoming::Failure {
                    msg_id,
                    error: error.into(),
                }),
            },
            _ => {
                self.note_own_update(msg_id, &result);
                self.results.push(Incoming::RpcResult {
                    msg_id,
                    body: result,
                });
            }
        }

        Ok(())
    }

    /// Results carrying an `Updates` body advance the `pts` like any other
    /// update; dropping them would eventually open a gap upstream.
    fn note_own_update(&mut self, msg_id: MsgId, body: &[u8]) {
        if let Ok(body_id) = u32::from_bytes(body) {
            if UPDATE_IDS.contains(&body_id) {
                self.results.push(Incoming::OwnUpdate {
                    msg_id,
                    update: body.to_vec(),
                });
            }
        }
    }

    /// `msgs_ack#62d6b459 msg_ids:Vector<long> = MsgsAck;`
    fn handle_ack(&mut self, message: Message) -> Result<(), DeserializeError> {
        // The server telling us it has seen our messages requires no
        // action; the `rpc_result` is what settles a request.
        let enums::MsgsAck::Ack(ack) = enums::MsgsAck::from_bytes(&message.body)?;
        trace!("server acknowledged {} messages", ack.msg_ids.len());
        Ok(())
    }

    /// `bad_msg_notification#a7eff811` and `bad_server_salt#edab447b`.
    ///
    /// The local state is fixed up right here (salt, time offset or
    /// sequence); the caller only needs to decide whether to resend.
    fn handle_bad_notification(&mut self, message: Message) -> Result<(), DeserializeError> {
        let notification = enums::BadMsgNotification::from_bytes(&message.body)?;

        let bad = match notification {
            enums::BadMsgNotification::ServerSalt(x) => {
                info!("server salt was rotated");
                self.salt = x.new_server_salt;
                BadMessage {
                    msg_id: MsgId(x.bad_msg_id),
                    code: x.error_code,
                }
            }
            enums::BadMsgNotification::Notification(x) => {
                match x.error_code {
                    16 | 17 => {
                        // Our clock is off; fix the offset using the
                        // server's own message identifier.
                        self.correct_time_offset(message.msg_id);
                    }
                    32 => {
                        // Sent seq_no too low; nudge it up.
                        self.sequence += 64;
                    }
                    33 => {
                        // Sent seq_no too high.
                        self.sequence -= 16;
                    }
                    _ => {}
                }
                BadMessage {
                    msg_id: MsgId(x.bad_msg_id),
                    code: x.error_code,
                }
            }
        };

        self.results.push(Incoming::BadMessage(bad));
        Ok(())
    }

    /// `msgs_state_req`, `msgs_state_info`, `msgs_all_info` and
    /// `msg_resend_req` are informational; correctness does not depend on
    /// them and they are not answered.
    fn handle_state_messages(&mut self, message: Message) -> Result<(), DeserializeError> {
        debug!(
            "ignoring message state information {:08x?}",
            message.constructor_id()
        );
        Ok(())
    }

    /// `msg_detailed_info#276d3ec6` and `msg_new_detailed_info#809db6df`.
    fn handle_detailed_info(&mut self, message: Message) -> Result<(), DeserializeError> {
        // Acknowledging the answer is the fastest way to have the server
        // re-send it if we never actually got it.
        let answer_msg_id = match enums::MsgDetailedInfo::from_bytes(&message.body)? {
            enums::MsgDetailedInfo::Info(x) => x.answer_msg_id,
            enums::MsgDetailedInfo::New(x) => x.answer_msg_id,
        };
        self.pending_ack.push(answer_msg_id);
        Ok(())
    }

    /// `future_salts#ae500895`, the response to `get_future_salts`.
    fn handle_future_salts(&mut self, message: Message) -> Result<(), DeserializeError> {
        let enums::FutureSalts::Salts(salts) = enums::FutureSalts::from_bytes(&message.body)?;

        self.results.push(Incoming::RpcResult {
            msg_id: MsgId(salts.req_msg_id),
            body: message.body,
        });
        Ok(())
    }

    /// `pong#347773c5 msg_id:long ping_id:long = Pong;`
    fn handle_pong(&mut self, message: Message) -> Result<(), DeserializeError> {
        let enums::Pong::Pong(pong) = enums::Pong::from_bytes(&message.body)?;

        self.results.push(Incoming::RpcResult {
            msg_id: MsgId(pong.msg_id),
            body: message.body,
        });
        Ok(())
    }

    /// `new_session_created#9ec20908 first_msg_id:long unique_id:long
    /// server_salt:long = NewSession;`
    fn handle_new_session_created(&mut self, message: Message) -> Result<(), DeserializeError> {
        let enums::NewSession::Created(new_session) =
            enums::NewSession::from_bytes(&message.body)?;

        info!("server created a new session");
        self.salt = new_session.server_salt;
        self.results.push(Incoming::NewSession);
        Ok(())
    }

    /// `msg_container#73f1f8dc messages:vector<message> = MessageContainer;`
    fn handle_container(&mut self, message: Message) -> Result<(), DeserializeError> {
        let container = MessageContainer::from_bytes(&message.body)?;
        for inner_message in container.messages {
            self.process_message(inner_message)?;
        }
        Ok(())
    }

    /// `gzip_packed#3072cfa1 packed_data:string = Object;`
    fn handle_gzip_packed(&mut self, message: Message) -> Result<(), DeserializeError> {
        let container = GzipPacked::from_bytes(&message.body)?;
        self.process_message(Message {
            body: container.decompress()?,
            ..message
        })
    }

    /// All service messages are handled above, so whatever body remains
    /// must be an `Updates`.
    fn handle_update(&mut self, message: Message) -> Result<(), DeserializeError> {
        self.results.push(Incoming::Update(message.body));
        Ok(())
    }
}

impl Mtp for Encrypted {
    fn push(&mut self, buffer: &mut HeadroomBuffer<u8>, request: &[u8]) -> Option<MsgId> {
        if self.msg_count == MessageContainer::MAXIMUM_LENGTH {
            return None;
        }

        // Requests this large would have the server close the connection
        // anyway, and the serializer always pads to 4 bytes.
        assert!(request.len() + Message::SIZE_OVERHEAD <= MessageContainer::MAXIMUM_SIZE);
        assert!(request.len() % 4 == 0);

        // Pushed payloads are always content-related, so compression is
        // allowed.
        let mut body = request;
        let compressed;
        if let Some(threshold) = self.compression_threshold {
            if request.len() >= threshold {
                compressed = GzipPacked::new(request).to_bytes();
                if compressed.len() < request.len() {
                    body = &compressed;
                }
            }
        }

        if buffer.len() + body.len() + Message::SIZE_OVERHEAD >= MessageContainer::MAXIMUM_SIZE {
            // No more requests fit in this payload.
            return None;
        }

        Some(self.serialize_msg(buffer, body, true))
    }

    fn finalize(&mut self, buffer: &mut HeadroomBuffer<u8>) -> Option<MsgId> {
        let msg_id = self.finalize_plain(buffer)?;
        encrypt_envelope(buffer, &self.auth_key);
        Some(msg_id)
    }

    fn deserialize(&mut self, payload: &[u8]) -> Result<Vec<Incoming>, DeserializeError> {
        crate::check_message_buffer(payload)?;

        let plaintext = decrypt_envelope(payload, &self.auth_key)?;

        let mut buffer = Cursor::from_slice(&plaintext);
        let _salt = i64::deserialize(&mut buffer)?;
        let session_id = i64::deserialize(&mut buffer)?;
        if session_id != self.session_id {
            return Err(DeserializeError::SessionIdMismatch {
                got: session_id,
                expected: self.session_id,
            });
        }

        self.process_message(Message::deserialize(&mut buffer)?)?;

        Ok(mem::take(&mut self.results))
    }

    /// Begin a new session over the same key: fresh session identifier and
    /// sequence, no pending acknowledgements. Message identifiers keep
    /// increasing so that re-sent requests get fresh ones.
    fn reset(&mut self) {
        debug!("resetting encrypted mtp session state");
        self.session_id = generate_session_id();
        self.sequence = 0;
        self.pending_ack.clear();
        self.msg_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // salt + session_id
    const PAYLOAD_PREFIX_LEN: usize = 16;

    const GZIP_PACKED_HEADER: [u8; 4] = [0xa1, 0xcf, 0x72, 0x30];
    const MSG_CONTAINER_HEADER: [u8; 4] = [0xdc, 0xf8, 0xf1, 0x73];

    const REQUEST: &[u8] = b"Hey!";
    const REQUEST_B: &[u8] = b"Bye!";

    fn auth_key() -> [u8; 256] {
        [0; 256]
    }

    fn mtp() -> Encrypted {
        Encrypted::build().finish(auth_key())
    }

    fn plain_buffer() -> HeadroomBuffer<u8> {
        HeadroomBuffer::with_capacity(0, MESSAGE_CONTAINER_HEADER_LEN + SALT_SESSION_HEADER_LEN)
    }

    fn ensure_buffer_is_message(buffer: &[u8], body: &[u8], seq_no: u8) {
        // msg_id, based on the current time
        assert_ne!(&buffer[0..8], [0; 8]);
        // seq_no, an ever-increasing odd number for content messages
        assert_eq!(&buffer[8..12], [seq_no, 0, 0, 0]);
        // bytes, the length of the body
        assert_eq!(&buffer[12..16], [body.len() as u8, 0, 0, 0]);
        assert_eq!(&buffer[16..], body);
    }

    #[test]
    fn salt_and_session_prefix_the_payload() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();

        mtp.push(&mut buffer, REQUEST);
        mtp.finalize_plain(&mut buffer);

        // The default salt is zero; the session id must not be.
        assert_eq!(&buffer[0..8], [0; 8]);
        assert_ne!(&buffer[8..16], [0; 8]);
        ensure_buffer_is_message(&buffer[PAYLOAD_PREFIX_LEN..], REQUEST, 1);
    }

    #[test]
    fn single_request_uses_no_container() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();

        let msg_id = mtp.push(&mut buffer, REQUEST).unwrap();
        let final_id = mtp.finalize_plain(&mut buffer).unwrap();
        assert_eq!(msg_id, final_id);

        ensure_buffer_is_message(&buffer[PAYLOAD_PREFIX_LEN..], REQUEST, 1);
    }

    #[test]
    fn multiple_requests_use_a_container() {
        let mut mtp = Encrypted::build()
            .compression_threshold(None)
            .finish(auth_key());
        let mut buffer = plain_buffer();

        let first = mtp.push(&mut buffer, REQUEST).unwrap();
        let second = mtp.push(&mut buffer, REQUEST_B).unwrap();
        assert!(first < second);

        let container_id = mtp.finalize_plain(&mut buffer).unwrap();
        assert!(second < container_id);

        let buffer = &buffer[PAYLOAD_PREFIX_LEN..];

        // container msg_id, seq_no (non-content, after two content ones)
        assert_ne!(&buffer[0..8], [0; 8]);
        assert_eq!(&buffer[8..12], [4, 0, 0, 0]);
        // container body length
        assert_eq!(&buffer[12..16], [48, 0, 0, 0]);
        // container constructor and message count
        assert_eq!(&buffer[16..20], MSG_CONTAINER_HEADER);
        assert_eq!(&buffer[20..24], [2, 0, 0, 0]);

        ensure_buffer_is_message(&buffer[24..44], REQUEST, 1);
        ensure_buffer_is_message(&buffer[44..], REQUEST_B, 3);
    }

    #[test]
    fn batched_requests_get_distinct_increasing_ids_and_odd_seqs() {
        let mut mtp = Encrypted::build()
            .compression_threshold(None)
            .finish(auth_key());
        let mut buffer = plain_buffer();

        let ids = [
            mtp.push(&mut buffer, REQUEST).unwrap(),
            mtp.push(&mut buffer, REQUEST_B).unwrap(),
            mtp.push(&mut buffer, REQUEST).unwrap(),
        ];
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);

        mtp.finalize_plain(&mut buffer);
        let buffer = &buffer[PAYLOAD_PREFIX_LEN..];

        // One single container with exactly three messages...
        assert_eq!(&buffer[16..20], MSG_CONTAINER_HEADER);
        assert_eq!(&buffer[20..24], [3, 0, 0, 0]);

        // ...all of which carry odd sequence numbers.
        ensure_buffer_is_message(&buffer[24..44], REQUEST, 1);
        ensure_buffer_is_message(&buffer[44..64], REQUEST_B, 3);
        ensure_buffer_is_message(&buffer[64..], REQUEST, 5);
    }

    #[test]
    fn generated_msg_ids_strictly_increase() {
        let mut mtp = mtp();
        let mut last = 0;
        for _ in 0..64 {
            let id = mtp.next_msg_id();
            assert!(id > last);
            assert_eq!(id & 0b11, 0);
            last = id;
        }
    }

    #[test]
    fn acks_are_flushed_with_the_next_payload() {
        let mut mtp = mtp();
        mtp.pending_ack.extend([1, 2, 3]);

        let mut buffer = plain_buffer();
        assert!(mtp.finalize_plain(&mut buffer).is_some());
        assert!(mtp.pending_ack.is_empty());

        // A single msgs_ack message, which is not content-related.
        let buffer = &buffer[PAYLOAD_PREFIX_LEN..];
        assert_eq!(&buffer[8..12], [0, 0, 0, 0]);
        let ack = enums::MsgsAck::from_bytes(&buffer[16..]).unwrap();
        let enums::MsgsAck::Ack(ack) = ack;
        assert_eq!(ack.msg_ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_finalize_produces_no_payload() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();
        assert_eq!(mtp.finalize(&mut buffer), None);
        assert!(buffer.is_empty());
    }

    #[test]
    #[should_panic]
    fn overlong_payload_panics() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &vec![0; 2 * 1024 * 1024]);
    }

    #[test]
    #[should_panic]
    fn non_padded_payload_panics() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &[1, 2, 3]);
    }

    #[test]
    fn compression_threshold_is_honored() {
        // No compression.
        let mut mtp = Encrypted::build()
            .compression_threshold(None)
            .finish(auth_key());
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &vec![0; 512 * 1024]);
        mtp.finalize_plain(&mut buffer);
        assert!(!buffer[..].windows(4).any(|w| w == GZIP_PACKED_HEADER));

        // High threshold, not reached.
        let mut mtp = Encrypted::build()
            .compression_threshold(Some(768 * 1024))
            .finish(auth_key());
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &vec![0; 512 * 1024]);
        mtp.finalize_plain(&mut buffer);
        assert!(!buffer[..].windows(4).any(|w| w == GZIP_PACKED_HEADER));

        // Low threshold, exceeded.
        let mut mtp = Encrypted::build()
            .compression_threshold(Some(256 * 1024))
            .finish(auth_key());
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &vec![0; 512 * 1024]);
        mtp.finalize_plain(&mut buffer);
        assert!(buffer[..].windows(4).any(|w| w == GZIP_PACKED_HEADER));

        // The default compresses large bodies.
        let mut mtp = self::mtp();
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, &vec![0; 512 * 1024]);
        mtp.finalize_plain(&mut buffer);
        assert!(buffer[..].windows(4).any(|w| w == GZIP_PACKED_HEADER));
    }

    #[test]
    fn finalize_encrypts_with_client_direction() {
        let mut mtp = mtp();
        let mut buffer = plain_buffer();
        mtp.push(&mut buffer, REQUEST);
        mtp.finalize(&mut buffer);

        // The envelope leads with our key id.
        let key = AuthKey::from_bytes(auth_key());
        assert_eq!(&buffer[..8], &key.key_id());

        // Client-to-server and server-to-client derive different keys, so
        // our own payload must not decrypt as if it came from the server.
        assert!(ferrogram_crypto::decrypt_envelope(&buffer[..], &key).is_err());
    }

    #[test]
    fn bad_server_salt_updates_salt_and_reports_retryable() {
        let mut mtp = mtp();
        assert_eq!(mtp.salt, 0);

        let body = enums::BadMsgNotification::ServerSalt(types::BadServerSalt {
            bad_msg_id: 1234,
            bad_msg_seqno: 1,
            error_code: 48,
            new_server_salt: 0x5eed,
        })
        .to_bytes();

        mtp.process_message(Message {
            msg_id: 1,
            seq_no: 0,
            body,
        })
        .unwrap();

        assert_eq!(mtp.salt, 0x5eed);
        match &mtp.results[..] {
            [Incoming::BadMessage(bad)] => {
                assert_eq!(bad.msg_id, MsgId(1234));
                assert!(bad.retryable());
                assert!(!bad.fatal());
            }
            other => panic!("unexpected results: {other:?}"),
        }
    }

    #[test]
    fn bad_msg_notification_adjusts_time_offset() {
        let mut mtp = mtp();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;
        let server_msg_id = (now + 60) << 32;

        let body = enums::BadMsgNotification::Notification(types::BadMsgNotification {
            bad_msg_id: 1234,
            bad_msg_seqno: 1,
            error_code: 16,
        })
        .to_bytes();

        mtp.process_message(Message {
            msg_id: server_msg_id,
            seq_no: 0,
            body,
        })
        .unwrap();

        // The server is 60 seconds ahead of us, give or take scheduling.
        assert!((59..=61).contains(&mtp.time_offset));
        assert!(mtp.next_msg_id() >> 32 >= now + 59);
    }

    #[test]
    fn pong_resolves_the_ping_request() {
        let mut mtp = mtp();
        let body = enums::Pong::Pong(types::Pong {
            msg_id: 999,
            ping_id: 777,
        })
        .to_bytes();

        mtp.process_message(Message {
            msg_id: 1,
            seq_no: 0,
            body,
        })
        .unwrap();

        assert!(matches!(
            &mtp.results[..],
            [Incoming::RpcResult { msg_id: MsgId(999), .. }]
        ));
    }

    #[test]
    fn new_session_created_rotates_salt_and_flags_catch_up() {
        let mut mtp = mtp();
        let body = enums::NewSession::Created(types::NewSessionCreated {
            first_msg_id: 5,
            unique_id: 6,
            server_salt: 0xabcd,
        })
        .to_bytes();

        mtp.process_message(Message {
            msg_id: 1,
            seq_no: 1,
            body,
        })
        .unwrap();

        assert_eq!(mtp.salt, 0xabcd);
        assert!(matches!(&mtp.results[..], [Incoming::NewSession]));
        // Content-related server messages get acknowledged.
        assert_eq!(mtp.pending_ack, vec![1]);
    }

    #[test]
    fn container_messages_are_processed_recursively() {
        let mut mtp = mtp();

        let pong = Message {
            msg_id: 11,
            seq_no: 0,
            body: enums::Pong::Pong(types::Pong {
                msg_id: 100,
                ping_id: 1,
            })
            .to_bytes(),
        };
        let salt = Message {
            msg_id: 13,
            seq_no: 0,
            body: enums::BadMsgNotification::ServerSalt(types::BadServerSalt {
                bad_msg_id: 200,
                bad_msg_seqno: 1,
                error_code: 48,
                new_server_salt: 7,
            })
            .to_bytes(),
        };

        let mut body = Vec::new();
        MessageContainer::CONSTRUCTOR_ID.serialize(&mut body);
        2i32.serialize(&mut body);
        pong.serialize(&mut body);
        salt.serialize(&mut body);

        mtp.process_message(Message {
            msg_id: 15,
            seq_no: 0,
            body,
        })
        .unwrap();

        assert_eq!(mtp.results.len(), 2);
        assert_eq!(mtp.salt, 7);
    }

    #[test]
    fn reset_starts_a_new_session() {
        let mut mtp = mtp();
        let old_session = mtp.session_id;
        mtp.sequence = 10;
        mtp.pending_ack.push(1);
        mtp.last_msg_id = 1 << 60;

        mtp.reset();

        assert_ne!(mtp.session_id, old_session);
        assert_eq!(mtp.sequence, 0);
        assert!(mtp.pending_ack.is_empty());
        // Identifiers never go back, even across sessions.
        assert!(mtp.next_msg_id() > 1 << 60);
    }
}
