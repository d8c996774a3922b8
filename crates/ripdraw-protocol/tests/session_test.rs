//! Frame transport tests against an in-memory channel.

use std::io::{self, Read, Write};

use proptest::prelude::*;
use ripdraw_protocol::{
    checksum, encode_frame, parse_frame, CommandId, MemoryChannel, ProtocolError, Session,
    SessionConfig, POS_DATA,
};

fn quiet_config() -> SessionConfig {
    SessionConfig {
        resync_delay_ms: 0,
        ..SessionConfig::default()
    }
}

fn session() -> Session<MemoryChannel> {
    Session::with_channel(MemoryChannel::new(), quiet_config())
}

/// A response frame with `status` followed by `data`.
fn response(command: CommandId, sequence: u16, status: u16, data: &[u8]) -> Vec<u8> {
    let mut payload = status.to_le_bytes().to_vec();
    payload.extend_from_slice(data);
    encode_frame(command.code(), sequence, &payload).unwrap()
}

/// Times out a fixed number of reads before serving queued bytes.
struct SlowChannel {
    timeouts: usize,
    inner: MemoryChannel,
}

impl SlowChannel {
    fn new(timeouts: usize) -> Self {
        SlowChannel {
            timeouts,
            inner: MemoryChannel::new(),
        }
    }
}

impl Read for SlowChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.timeouts > 0 {
            self.timeouts -= 1;
            return Err(io::Error::new(io::ErrorKind::TimedOut, "no data"));
        }
        self.inner.read(buf)
    }
}

impl Write for SlowChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[test]
fn test_call_roundtrip() {
    let mut session = session();
    session
        .channel_mut()
        .push_inbound(&response(CommandId::ImageLoad, 1, 0, &[0x07, 0x00]));

    let response = session
        .begin_request(CommandId::ImageLoad)
        .string("logo")
        .call()
        .unwrap();
    assert_eq!(response.read_word(POS_DATA).unwrap(), 7);
    assert_eq!(response.command_id().unwrap(), 0x3231);
    assert_eq!(session.last_status(), 0);

    let sent = session.channel().outbound().to_vec();
    let (header, payload) = parse_frame(&sent).unwrap();
    assert_eq!(header.command_id, 0x3231);
    assert_eq!(header.sequence, 1);
    assert_eq!(payload, &[4, 0, b'l', b'o', b'g', b'o']);
}

#[test]
fn test_sequence_advances_per_request() {
    let mut session = session();
    for seq in 1..=3u16 {
        session
            .channel_mut()
            .push_inbound(&response(CommandId::Reset, seq, 0, &[]));
        session.reset().unwrap();
        assert_eq!(session.sequence(), seq);
    }
}

#[test]
fn test_resync_skips_stray_bytes() {
    let mut session = session();
    session.channel_mut().push_inbound(&[0x00, 0x31, 0xFF, 0x36, 0x02]);
    session
        .channel_mut()
        .push_inbound(&response(CommandId::Reset, 1, 0, &[]));

    session.reset().unwrap();
    assert_eq!(session.channel().pending_inbound(), 0);
}

#[test]
fn test_resync_gives_up_after_attempt_cap() {
    let config = SessionConfig {
        resync_attempts: 5,
        ..quiet_config()
    };
    let mut session = Session::with_channel(MemoryChannel::new(), config);
    session.channel_mut().push_inbound(&[0u8; 20]);
    session
        .channel_mut()
        .push_inbound(&response(CommandId::Reset, 1, 0, &[]));

    let err = session.reset().unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout { attempts: 5 }));
    assert!(err.is_connection_fatal());
}

#[test]
fn test_slow_device_is_waited_for() {
    let mut channel = SlowChannel::new(2);
    channel
        .inner
        .push_inbound(&response(CommandId::Reset, 1, 0, &[]));
    let mut session = Session::with_channel(channel, quiet_config());

    session.reset().unwrap();
    assert_eq!(session.channel().inner.pending_inbound(), 0);
}

#[test]
fn test_silent_device_with_read_timeout() {
    let config = SessionConfig {
        resync_attempts: 3,
        ..quiet_config()
    };
    let mut session = Session::with_channel(SlowChannel::new(usize::MAX), config);

    let err = session.reset().unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout { attempts: 3 }));
    assert!(err.is_connection_fatal());
    assert_eq!(session.channel().inner.outbound().len(), 8);
}

#[test]
fn test_timeouts_and_stray_bytes_share_the_attempt_cap() {
    let config = SessionConfig {
        resync_attempts: 4,
        ..quiet_config()
    };
    let mut channel = SlowChannel::new(2);
    channel.inner.push_inbound(&[0u8; 3]);
    channel
        .inner
        .push_inbound(&response(CommandId::Reset, 1, 0, &[]));
    let mut session = Session::with_channel(channel, config);

    assert!(matches!(
        session.reset(),
        Err(ProtocolError::Timeout { attempts: 4 })
    ));
}

#[test]
fn test_sequence_mismatch() {
    for actual in [0u16, 2, 0xFFFF] {
        let mut session = session();
        session
            .channel_mut()
            .push_inbound(&response(CommandId::Reset, actual, 0, &[]));
        match session.reset() {
            Err(ProtocolError::SequenceMismatch {
                expected: 1,
                actual: got,
            }) => assert_eq!(got, actual),
            other => panic!("expected sequence mismatch, got {:?}", other),
        }
    }
}

#[test]
fn test_checksum_mismatch() {
    let mut frame = response(CommandId::TestEcho, 1, 0, &[2, 0, b'h', b'i']);
    frame[9] ^= 0x01;
    let mut session = session();
    session.channel_mut().push_inbound(&frame);

    assert!(matches!(
        session.test_echo("hi"),
        Err(ProtocolError::ChecksumMismatch { .. })
    ));
    assert!(session.response().is_empty());
}

#[test]
fn test_corrupted_checksum_field() {
    let mut frame = response(CommandId::Reset, 1, 0, &[]);
    let last = frame.len() - 1;
    frame[last] = frame[last].wrapping_add(1);
    let mut session = session();
    session.channel_mut().push_inbound(&frame);

    assert!(matches!(
        session.reset(),
        Err(ProtocolError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_device_status_is_reported() {
    let mut session = session();
    session
        .channel_mut()
        .push_inbound(&response(CommandId::ImageLoad, 1, 0x0102, &[]));

    let err = session.image_load("missing").unwrap_err();
    assert_eq!(err.device_status(), Some(0x0102));
    assert!(!err.is_connection_fatal());
    assert_eq!(session.last_status(), 0x0102);
    assert_eq!(session.response().status().unwrap(), 0x0102);
}

#[test]
fn test_oversized_payload_is_rejected_before_reading() {
    let config = SessionConfig {
        max_response_payload: 64,
        ..quiet_config()
    };
    let mut session = Session::with_channel(MemoryChannel::new(), config);
    session
        .channel_mut()
        .push_inbound(&response(CommandId::TestEcho, 1, 0, &[0u8; 100]));

    assert!(matches!(
        session.test_echo("x"),
        Err(ProtocolError::FrameTooLong {
            max: 64,
            actual: 102
        })
    ));
    assert_eq!(session.channel().pending_inbound(), 102 + 2);
}

#[test]
fn test_response_without_status() {
    let frame = encode_frame(CommandId::Reset.code(), 1, &[]).unwrap();
    let mut session = session();
    session.channel_mut().push_inbound(&frame);

    assert!(matches!(
        session.reset(),
        Err(ProtocolError::OutOfBounds { offset: 6, .. })
    ));
}

#[test]
fn test_truncated_response() {
    let frame = response(CommandId::Reset, 1, 0, &[1, 2, 3]);
    let mut session = session();
    session.channel_mut().push_inbound(&frame[..frame.len() - 3]);

    assert!(matches!(
        session.reset(),
        Err(ProtocolError::TransportRead(_))
    ));
}

#[test]
fn test_silent_device() {
    let mut session = session();
    assert!(matches!(
        session.reset(),
        Err(ProtocolError::TransportRead(_))
    ));
    assert_eq!(session.channel().outbound().len(), 8);
}

#[test]
fn test_session_recovers_after_failed_call() {
    let mut session = session();
    session
        .channel_mut()
        .push_inbound(&response(CommandId::Reset, 1, 5, &[]));
    assert!(session.reset().is_err());

    session
        .channel_mut()
        .push_inbound(&response(CommandId::Reset, 2, 0, &[]));
    session.reset().unwrap();
    assert_eq!(session.last_status(), 0);
}

proptest! {
    #[test]
    fn prop_request_length_and_checksum(payload in proptest::collection::vec(any::<u8>(), 0..600)) {
        let mut session = session();
        session
            .begin_request(CommandId::TestEcho)
            .raw(&payload)
            .send()
            .unwrap();

        let sent = session.channel().outbound();
        prop_assert_eq!(sent.len(), 6 + payload.len() + 2);
        prop_assert_eq!(u16::from_le_bytes([sent[4], sent[5]]) as usize, payload.len());
        let sum = checksum(&sent[..sent.len() - 2]);
        prop_assert_eq!(&sent[sent.len() - 2..], &sum.to_le_bytes()[..]);
        prop_assert_eq!(&sent[6..6 + payload.len()], &payload[..]);
    }

    #[test]
    fn prop_resync_over_stray_prefix(
        garbage in proptest::collection::vec(0u8..0x30, 0..200),
        data in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut session = session();
        session.channel_mut().push_inbound(&garbage);
        session
            .channel_mut()
            .push_inbound(&response(CommandId::EventMessage, 1, 0, &data));

        let response = session.begin_request(CommandId::EventMessage).call().unwrap();
        prop_assert_eq!(response.data(), &data[..]);
    }

    #[test]
    fn prop_flipped_payload_bit_fails_checksum(
        data in proptest::collection::vec(any::<u8>(), 0..64),
        index in any::<proptest::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut frame = response(CommandId::TestEcho, 1, 0, &data);
        // Status word and data, never the header or the checksum.
        let target = 6 + index.index(2 + data.len());
        frame[target] ^= 1 << bit;

        let mut session = session();
        session.channel_mut().push_inbound(&frame);
        let result = session.begin_request(CommandId::TestEcho).call().map(|_| ());
        prop_assert!(
            matches!(result, Err(ProtocolError::ChecksumMismatch { .. })),
            "flipping bit {} of byte {} gave {:?}",
            bit,
            target,
            result
        );
        prop_assert!(session.response().is_empty());
    }
}
